//! The transaction lifecycle: creating, updating, deleting, listing and summarizing.
//!
//! Every operation loads the whole collection from the store, works on it in
//! memory and, for changes, saves the whole collection back.

use time::format_description::well_known::Rfc3339;

use crate::{
    Error,
    clock::Clock,
    store::TransactionStore,
    transaction::{
        Summary, Transaction, TransactionFilter, TransactionId, TransactionInput,
        filter_transactions, sort_transactions, summarize, validate,
    },
};

/// Owns the store and runs the transaction operations against it.
pub struct Ledger {
    store: Box<dyn TransactionStore>,
    clock: Box<dyn Clock>,
}

impl Ledger {
    /// Create a ledger that persists to `store` and stamps new transactions using `clock`.
    pub fn new(store: impl TransactionStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            store: Box::new(store),
            clock: Box::new(clock),
        }
    }

    /// Validate `input` and store it as a new transaction.
    ///
    /// The new transaction gets the next free ID and the current time as its creation time.
    ///
    /// # Errors
    /// Returns a validation error from [validate], or [Error::StorageError] if saving failed.
    pub fn create(&mut self, input: &TransactionInput) -> Result<Transaction, Error> {
        let validated = validate(input)?;
        let mut transactions = self.store.load();

        let transaction = Transaction {
            id: next_id(&transactions),
            kind: validated.kind,
            amount: validated.amount,
            category: validated.category,
            date: validated.date,
            created_at: self.timestamp()?,
        };

        transactions.push(transaction.clone());
        self.store.save(&transactions)?;

        tracing::info!(
            "Created {} transaction {} for {}",
            transaction.kind,
            transaction.id,
            transaction.amount
        );

        Ok(transaction)
    }

    /// Replace the type, amount, category and date of the transaction with `id`.
    ///
    /// The ID and creation time are kept. All fields must be supplied again,
    /// the same rules as [Ledger::create] apply.
    ///
    /// # Errors
    /// Returns a validation error from [validate], [Error::NotFound] if there is
    /// no transaction with `id`, or [Error::StorageError] if saving failed.
    pub fn update(
        &mut self,
        id: TransactionId,
        input: &TransactionInput,
    ) -> Result<Transaction, Error> {
        let validated = validate(input)?;
        let mut transactions = self.store.load();

        let transaction = transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or(Error::NotFound)?;

        transaction.kind = validated.kind;
        transaction.amount = validated.amount;
        transaction.category = validated.category;
        transaction.date = validated.date;
        let updated = transaction.clone();

        self.store.save(&transactions)?;
        tracing::info!("Updated transaction {id}");

        Ok(updated)
    }

    /// Remove the transaction with `id`. Its ID is not handed out again
    /// unless it was the highest one.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no transaction with `id`, or
    /// [Error::StorageError] if saving failed.
    pub fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let mut transactions = self.store.load();

        let index = transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or(Error::NotFound)?;
        transactions.remove(index);

        self.store.save(&transactions)?;
        tracing::info!("Deleted transaction {id}");

        Ok(())
    }

    /// The transactions matching `filter`, newest first.
    ///
    /// # Errors
    /// Returns [Error::InvalidStoredDate] if a date filter hits a malformed stored date.
    pub fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, Error> {
        let mut transactions = filter_transactions(self.store.load(), filter)?;
        sort_transactions(&mut transactions);

        Ok(transactions)
    }

    /// The transaction with `id`, if there is one.
    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.store
            .load()
            .into_iter()
            .find(|transaction| transaction.id == id)
    }

    /// Income and expense totals, optionally limited to a year or a month of a year.
    ///
    /// # Errors
    /// Returns [Error::InvalidStoredDate] if a date filter hits a malformed stored date.
    pub fn summary(&self, month: Option<u8>, year: Option<i32>) -> Result<Summary, Error> {
        let transactions =
            filter_transactions(self.store.load(), &TransactionFilter::by_date(month, year))?;

        Ok(summarize(&transactions))
    }

    fn timestamp(&self) -> Result<String, Error> {
        self.clock
            .now()
            .format(&Rfc3339)
            .map_err(|error| Error::TimestampFormat(error.to_string()))
    }
}

/// One more than the highest ID in `transactions`, or 1 if there are none.
pub fn next_id(transactions: &[Transaction]) -> TransactionId {
    transactions
        .iter()
        .map(|transaction| transaction.id)
        .max()
        .map_or(1, |max_id| max_id + 1)
}

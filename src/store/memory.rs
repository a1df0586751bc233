//! In-memory store for tests and throwaway instances.

use crate::{Error, store::TransactionStore, transaction::Transaction};

/// Keeps the collection in a `Vec`, nothing touches the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `transactions`.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}

impl TransactionStore for MemoryStore {
    fn load(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error> {
        self.transactions = transactions.to_vec();
        Ok(())
    }
}

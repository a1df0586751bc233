//! Persistence for the transaction collection.
//!
//! The whole collection is read and written as one unit, there are no partial
//! updates.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::{Error, transaction::Transaction};

/// Loads and saves the full set of transactions.
pub trait TransactionStore: Send {
    /// Read every stored transaction.
    ///
    /// Implementations treat missing or unreadable data as an empty collection
    /// instead of failing, and skip individual records they cannot decode.
    fn load(&self) -> Vec<Transaction>;

    /// Replace the stored collection with `transactions`.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the data could not be written.
    fn save(&mut self, transactions: &[Transaction]) -> Result<(), Error>;
}

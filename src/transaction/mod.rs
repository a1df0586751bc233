//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the rules for validating client input
//! - Filtering, sorting and summarizing lists of transactions
//! - The `Ledger` that runs each operation against a store
//! - The REST route handlers

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod filter_params;
mod ledger;
mod list_endpoint;
mod query;
mod summary;
mod summary_endpoint;
mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use self::core::{Category, Transaction, TransactionId, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::update_transaction_endpoint;
pub use filter_params::FilterParams;
pub use ledger::{Ledger, next_id};
pub use list_endpoint::list_transactions_endpoint;
pub use query::{TransactionFilter, filter_transactions, parse_date, sort_transactions};
pub use summary::{Summary, summarize};
pub use summary_endpoint::get_summary_endpoint;
pub use validation::{AmountInput, TextInput, TransactionInput, ValidatedTransaction, validate};

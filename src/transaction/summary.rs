//! Income and expense totals over a set of transactions.

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionType};

/// Totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of all income amounts.
    pub total_income: f64,
    /// Sum of all expense amounts.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub balance: f64,
}

/// Sum up income and expenses in `transactions`.
///
/// An empty slice gives all zeros.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let total_of = |kind: TransactionType| -> f64 {
        transactions
            .iter()
            .filter(|transaction| transaction.kind == kind)
            .map(|transaction| transaction.amount)
            .sum()
    };

    let total_income = total_of(TransactionType::Income);
    let total_expenses = total_of(TransactionType::Expense);

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

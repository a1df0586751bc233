//! Defines the core data model for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// Whether money was spent or earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was spent.
    Expense,
    /// Money that was earned.
    Income,
}

impl TransactionType {
    /// The lowercase name used in JSON documents and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            _ => Err(Error::InvalidType),
        }
    }
}

/// What an expense was spent on.
///
/// Only expenses carry a category, income never does.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, eating out.
    Food,
    /// Rent and housing.
    Rent,
    /// Flights, fuel, accommodation.
    Travel,
    /// Anything else.
    Misc,
    /// A name outside the allowed set found in an existing document.
    ///
    /// Such records are kept as they are. Client input never produces this variant.
    #[serde(untagged)]
    Other(String),
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Rent,
        Category::Travel,
        Category::Misc,
    ];

    /// The name used in JSON documents.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Travel => "Travel",
            Category::Misc => "Misc",
            Category::Other(name) => name.as_str(),
        }
    }

    /// The category names sorted alphabetically, formatted as a list for error messages,
    /// e.g. `['Food', 'Misc', 'Rent', 'Travel']`.
    pub fn allowed_names() -> String {
        let mut names: Vec<String> = Category::ALL.iter().map(Category::to_string).collect();
        names.sort_unstable();

        let quoted: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();

        format!("[{}]", quoted.join(", "))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or(Error::InvalidCategory)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Fields are declared in the order they are written to disk so that the
/// persisted document diffs cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique ID, assigned on creation and never reused.
    pub id: TransactionId,
    /// Whether this is an expense or income.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
    /// The expense category, `None` for income.
    pub category: Option<Category>,
    /// The calendar date of the transaction as "YYYY-MM-DD".
    pub date: String,
    /// When the transaction was recorded, as an RFC 3339 timestamp.
    ///
    /// Older documents may lack this field, in which case it is empty.
    #[serde(default)]
    pub created_at: String,
}

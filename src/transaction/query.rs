//! Filtering and ordering of transaction lists.

use std::cmp::Ordering;

use time::{Date, macros::format_description};

use crate::{Error, transaction::Transaction};

/// Selects which transactions [filter_transactions] keeps.
///
/// All set criteria must match. A `month` without a `year` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Keep transactions whose type is exactly this string, e.g. "expense".
    pub kind: Option<String>,
    /// Month of the year, 1 to 12. Only applies together with `year`.
    pub month: Option<u8>,
    /// Calendar year, e.g. 2024.
    pub year: Option<i32>,
}

impl TransactionFilter {
    /// A filter on the date only, as used for summaries.
    pub fn by_date(month: Option<u8>, year: Option<i32>) -> Self {
        Self {
            kind: None,
            month,
            year,
        }
    }
}

/// Keep the transactions that match `filter`, preserving their order.
///
/// # Errors
/// Returns [Error::InvalidStoredDate] if a month or year filter is set and a
/// transaction's date is not a valid "YYYY-MM-DD" date.
pub fn filter_transactions(
    transactions: Vec<Transaction>,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>, Error> {
    let mut filtered = transactions;

    if let Some(kind) = filter.kind.as_deref().filter(|kind| !kind.is_empty()) {
        filtered.retain(|transaction| transaction.kind.as_str() == kind);
    }

    // Zero means "no filter" on both the REST and GraphQL surfaces, so `month=0` never empties a year.
    let year = filter.year.filter(|year| *year != 0);
    let month = filter.month.filter(|month| *month != 0);

    match (year, month) {
        (Some(year), Some(month)) => retain_by_date(filtered, |date| {
            date.year() == year && u8::from(date.month()) == month
        }),
        (Some(year), None) => retain_by_date(filtered, |date| date.year() == year),
        // A month on its own does not filter anything.
        (None, _) => Ok(filtered),
    }
}

fn retain_by_date(
    transactions: Vec<Transaction>,
    predicate: impl Fn(Date) -> bool,
) -> Result<Vec<Transaction>, Error> {
    let mut kept = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        if predicate(parse_date(&transaction.date)?) {
            kept.push(transaction);
        }
    }

    Ok(kept)
}

/// Parse a "YYYY-MM-DD" date string.
///
/// # Errors
/// Returns [Error::InvalidStoredDate] with the offending text if it is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidStoredDate(text.to_owned()))
}

/// Order transactions newest first: by date, then by creation time, both descending.
///
/// Transactions without a creation time sort after those with one on the same date.
/// The sort is stable, so full ties keep their stored order.
pub fn sort_transactions(transactions: &mut [Transaction]) {
    transactions.sort_by(newest_first);
}

fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

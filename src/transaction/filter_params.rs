//! Query string parameters for filtering transactions.

use serde::Deserialize;

use crate::{Error, transaction::TransactionFilter};

/// The raw `type`, `month` and `year` query parameters.
///
/// Empty values are treated as if the parameter was not given.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    #[serde(rename = "type")]
    kind: Option<String>,
    month: Option<String>,
    year: Option<String>,
}

impl FilterParams {
    /// Parse the parameters into a [TransactionFilter].
    ///
    /// # Errors
    /// Returns [Error::InvalidFilter] if `month` or `year` is not a number.
    pub fn into_filter(self) -> Result<TransactionFilter, Error> {
        Ok(TransactionFilter {
            kind: non_empty(self.kind),
            // "0" parses to 0, which the filter treats as absent.
            month: parse_number(self.month, "month")?,
            year: parse_number(self.year, "year")?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn parse_number<T: std::str::FromStr>(value: Option<String>, name: &str) -> Result<Option<T>, Error> {
    non_empty(value)
        .map(|text| {
            text.trim()
                .parse()
                .map_err(|_| Error::InvalidFilter(format!("{name} must be a number, got \"{text}\"")))
        })
        .transpose()
}

//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::transaction::Category;

/// The errors that may occur in the application.
///
/// The display text of the validation and not found variants is sent to
/// clients as is, by both the REST and the GraphQL API.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One of type, amount or date was absent or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// The transaction type was neither "expense" nor "income".
    #[error("Type must be either \"expense\" or \"income\"")]
    InvalidType,

    /// The amount was not a number greater than zero.
    #[error("Amount must be greater than 0")]
    InvalidAmount,

    /// An expense was submitted without a category.
    #[error("Category is required for expenses")]
    MissingCategory,

    /// An expense was submitted with a category outside the allowed set.
    #[error("Category must be one of {allowed}", allowed = Category::allowed_names())]
    InvalidCategory,

    /// The requested transaction does not exist.
    #[error("Transaction not found")]
    NotFound,

    /// A query parameter could not be parsed, e.g. a non-numeric year.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The request body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A stored transaction has a date that is not "YYYY-MM-DD".
    ///
    /// This only surfaces when filtering by month or year.
    #[error("stored transaction has a malformed date \"{0}\"")]
    InvalidStoredDate(String),

    /// The transaction file could not be written.
    ///
    /// The error string should only be logged on the server. Clients get a
    /// generic internal server error instead.
    #[error("storage error: {0}")]
    StorageError(String),

    /// The current time could not be formatted as a timestamp.
    #[error("could not format timestamp: {0}")]
    TimestampFormat(String),

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LockError,
}

impl Error {
    /// Whether the error was caused by the client's input and should be shown to them.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingFields
                | Error::InvalidType
                | Error::InvalidAmount
                | Error::MissingCategory
                | Error::InvalidCategory
                | Error::NotFound
                | Error::InvalidFilter(_)
                | Error::InvalidBody(_)
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            error if error.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_client_error() {
            self.to_string()
        } else {
            // Any errors that are not caused by the client are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {self}");
            "Internal server error".to_owned()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

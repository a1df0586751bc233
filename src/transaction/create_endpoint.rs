//! The route handler for creating a transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    Error,
    app_state::LedgerState,
    transaction::{Transaction, TransactionInput},
};

/// A route handler for creating a new transaction, responds with 201 and the
/// created transaction.
pub async fn create_transaction_endpoint(
    State(state): State<LedgerState>,
    body: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let input = decode_body(body)?;

    state
        .with_ledger(|ledger| ledger.create(&input))
        .map(|transaction| (StatusCode::CREATED, Json(transaction)))
}

/// Turn a JSON extractor rejection into an [Error::InvalidBody] so the client gets a JSON error.
pub(crate) fn decode_body(
    body: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<TransactionInput, Error> {
    body.map(|Json(input)| input).map_err(|rejection| {
        tracing::debug!("Rejected transaction body: {rejection}");
        Error::InvalidBody(rejection.body_text())
    })
}

//! The route handler for updating a transaction.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::{
    Error,
    app_state::LedgerState,
    transaction::{Transaction, TransactionId, TransactionInput, create_endpoint::decode_body},
};

/// A route handler for replacing the details of a transaction.
///
/// All of type, amount, category and date must be sent again. Responds with
/// 404 if the transaction does not exist.
pub async fn update_transaction_endpoint(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<TransactionId>,
    body: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let input = decode_body(body)?;

    state
        .with_ledger(|ledger| ledger.update(transaction_id, &input))
        .map(Json)
}

//! The route handler for deleting a transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{Error, app_state::LedgerState, transaction::TransactionId};

/// A route handler for deleting a transaction, responds with `{"success": true}`.
///
/// Responds with 404 if the transaction does not exist.
pub async fn delete_transaction_endpoint(
    State(state): State<LedgerState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Value>, Error> {
    state.with_ledger(|ledger| ledger.delete(transaction_id))?;

    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        transaction::{Transaction, test_utils::get_test_server},
    };

    #[tokio::test]
    async fn deletes_transaction_once() {
        let server = get_test_server();
        let created = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({"type": "income", "amount": 5, "date": "2024-03-01"}))
            .await
            .json::<Transaction>();
        let path = format_endpoint(endpoints::TRANSACTION, created.id);

        let response = server.delete(&path).await;
        response.assert_status_ok();
        response.assert_json(&json!({"success": true}));

        let response = server.delete(&path).await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({"error": "Transaction not found"}));

        server
            .get(endpoints::TRANSACTIONS_API)
            .await
            .assert_json(&json!([]));
    }
}

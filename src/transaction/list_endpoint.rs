//! The route handler for listing transactions.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    app_state::LedgerState,
    transaction::{FilterParams, Transaction},
};

/// A route handler for listing transactions, newest first.
///
/// Accepts the optional query parameters `type`, `month` and `year`.
pub async fn list_transactions_endpoint(
    State(state): State<LedgerState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let filter = params.into_filter()?;

    state.with_ledger(|ledger| ledger.list(&filter)).map(Json)
}

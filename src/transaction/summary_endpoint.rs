//! The route handler for the income and expense summary.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    Error,
    app_state::LedgerState,
    transaction::{FilterParams, Summary},
};

/// A route handler for the income, expense and balance totals.
///
/// Accepts the optional query parameters `month` and `year`. A `type`
/// parameter is ignored.
pub async fn get_summary_endpoint(
    State(state): State<LedgerState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Summary>, Error> {
    let filter = params.into_filter()?;

    state
        .with_ledger(|ledger| ledger.summary(filter.month, filter.year))
        .map(Json)
}

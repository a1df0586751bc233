//! Application router configuration.

use async_graphql_axum::GraphQL;
use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, patch},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    app_state::LedgerState,
    endpoints,
    graphql::{build_schema, get_graphiql_page},
    logging::logging_middleware,
    not_found::get_404_not_found,
    static_files::static_file_routes,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_summary_endpoint,
        list_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let schema = build_schema(LedgerState::from_ref(&state));

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            patch(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .route(
            endpoints::GRAPHQL,
            get(get_graphiql_page).post_service(GraphQL::new(schema)),
        );

    api_routes
        .merge(static_file_routes(&state.static_dir))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

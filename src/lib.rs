//! Splitcash is a personal finance tracker for recording income and expenses.
//!
//! This library provides a JSON REST API and an equivalent GraphQL API over
//! transactions stored in a single JSON file.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod clock;
mod config;
mod endpoints;
mod error;
mod graphql;
mod logging;
mod not_found;
mod routing;
mod static_files;
mod store;
mod transaction;

pub use app_state::{AppState, LedgerState};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use endpoints::format_endpoint;
pub use error::Error;
pub use graphql::{FinanceSchema, MutationRoot, QueryRoot, build_schema};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use store::{JsonFileStore, MemoryStore, TransactionStore};
pub use transaction::{
    AmountInput, Category, Ledger, Summary, TextInput, Transaction, TransactionFilter,
    TransactionId, TransactionInput, TransactionType, ValidatedTransaction, filter_transactions, next_id,
    parse_date, sort_transactions, summarize, validate,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

use std::{
    fs::{self, File},
    net::SocketAddr,
    path::Path,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use splitcash::{AppState, Config, JsonFileStore, Ledger, SystemClock, build_router, graceful_shutdown};

const LOG_FILE_NAME: &str = "splitcash.log";

#[tokio::main]
async fn main() {
    let config = Config::parse();

    setup_logging(&config.log_dir, config.debug);

    let mut store = JsonFileStore::new(&config.data_path);
    if let Err(error) = store.initialize() {
        tracing::error!("Could not initialize the transaction file: {error}");
        return;
    }

    let state = AppState::new(
        Ledger::new(store, SystemClock),
        &config.static_dir,
        config.debug,
    );

    let handle: Handle<SocketAddr> = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));
    let addr = config.address();

    tracing::info!(
        "HTTP server listening on {addr}, storing transactions in {}",
        config.data_path.display()
    );
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
    }
}

/// Log to stdout and to a log file in `log_dir`, which is cleared on every start.
fn setup_logging(log_dir: &Path, debug: bool) {
    let level = if debug {
        filter::LevelFilter::DEBUG
    } else {
        filter::LevelFilter::INFO
    };

    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(level);

    let file_log = fs::create_dir_all(log_dir)
        .and_then(|_| File::create(log_dir.join(LOG_FILE_NAME)))
        .map(|log_file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file))
                .with_filter(level)
        });

    match file_log {
        Ok(file_log) => {
            tracing_subscriber::registry()
                .with(stdout_log)
                .with(file_log)
                .init();
        }
        Err(error) => {
            tracing_subscriber::registry().with(stdout_log).init();
            tracing::warn!(
                "Could not create log file in {}, logging to stdout only: {error}",
                log_dir.display()
            );
        }
    }
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}

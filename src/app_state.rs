//! Implements a struct that holds the state of the REST server.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use axum::extract::FromRef;

use crate::{Error, transaction::Ledger};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The ledger shared by the REST and GraphQL handlers.
    ///
    /// The mutex makes every load-modify-save cycle run on its own.
    pub ledger: Arc<Mutex<Ledger>>,

    /// The directory holding the front-end files.
    pub static_dir: PathBuf,

    /// Whether debug mode is enabled, which turns on the GraphiQL IDE.
    pub debug: bool,
}

impl AppState {
    /// Create a new [AppState] around `ledger`.
    pub fn new(ledger: Ledger, static_dir: impl AsRef<Path>, debug: bool) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            static_dir: static_dir.as_ref().to_path_buf(),
            debug,
        }
    }
}

/// The state needed by handlers that work with transactions.
#[derive(Clone)]
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Run `operation` while holding the ledger lock.
    ///
    /// The lock is released before this returns, so it is never held across an `.await`.
    ///
    /// # Errors
    /// Returns [Error::LockError] if the lock is poisoned, otherwise whatever `operation` returns.
    pub fn with_ledger<T>(
        &self,
        operation: impl FnOnce(&mut Ledger) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut ledger = self.ledger.lock().map_err(|error| {
            tracing::error!("Could not acquire ledger lock: {error}");
            Error::LockError
        })?;

        operation(&mut ledger)
    }
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

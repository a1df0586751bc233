use axum_test::TestServer;
use time::macros::datetime;

use crate::{
    AppState, build_router,
    clock::FixedClock,
    store::MemoryStore,
    transaction::{Ledger, Transaction},
};

/// An [AppState] over an in-memory store whose clock is fixed at 2024-03-15 12:30 UTC.
pub(crate) fn get_test_state(transactions: Vec<Transaction>) -> AppState {
    let ledger = Ledger::new(
        MemoryStore::with_transactions(transactions),
        FixedClock::new(datetime!(2024-03-15 12:30:00 UTC)),
    );

    AppState::new(ledger, "static", false)
}

pub(crate) fn get_test_server() -> TestServer {
    get_test_server_with(Vec::new())
}

pub(crate) fn get_test_server_with(transactions: Vec<Transaction>) -> TestServer {
    let app = build_router(get_test_state(transactions));

    TestServer::try_new(app).expect("Could not create test server.")
}

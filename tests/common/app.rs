//! Application fixture
//!
//! Builds the real router over a `MemoryStore`, so HTTP tests need no
//! database. The bcrypt cost is the minimum to keep signups fast.

use axum_test::TestServer;
use repbook::backend::auth::PasswordHasher;
use repbook::backend::routes::create_router;
use repbook::backend::server::AppState;
use repbook::backend::store::MemoryStore;
use std::sync::Arc;
use std::time::Duration;

/// Lowest cost bcrypt accepts
pub const TEST_BCRYPT_COST: u32 = 4;

/// Router under test plus a handle on its store
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
}

/// App over a store seeded with the reference exercise catalog
pub fn spawn_app() -> TestApp {
    spawn_app_with_store(MemoryStore::with_reference_catalog())
}

/// App over the given store
pub fn spawn_app_with_store(store: MemoryStore) -> TestApp {
    spawn_app_with(store, TEST_BCRYPT_COST, Duration::from_secs(15))
}

/// App with an explicit bcrypt cost and request deadline
pub fn spawn_app_with(store: MemoryStore, bcrypt_cost: u32, request_timeout: Duration) -> TestApp {
    let hasher = PasswordHasher::new(bcrypt_cost, 2).expect("valid bcrypt cost");
    let state = AppState::new(Arc::new(store.clone()), hasher);
    let router = create_router(state, request_timeout);

    TestApp {
        server: TestServer::new(router).expect("test server"),
        store,
    }
}

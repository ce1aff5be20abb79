/**
 * Application State Management
 *
 * `AppState` is the one container handed to the router. It holds:
 * - the member store (`Arc<dyn MemberStore>`)
 * - the password hashing pool
 *
 * Both are cheap to clone and safe to share across requests. The `FromRef`
 * implementations let a handler ask for just the part it needs:
 *
 * ```rust
 * use axum::extract::State;
 * use repbook::backend::store::SharedStore;
 *
 * async fn handler(State(store): State<SharedStore>) {
 *     let _ = store.exercises().await;
 * }
 * ```
 */

use axum::extract::FromRef;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::store::SharedStore;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub hasher: PasswordHasher,
}

impl AppState {
    pub fn new(store: SharedStore, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(state: &AppState) -> Self {
        state.hasher.clone()
    }
}

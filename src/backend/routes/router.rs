/**
 * Router Creation
 *
 * Assembles the public and authenticated routes and wraps them in the outer
 * middleware stack:
 *
 * - `TraceLayer` - one span per request, status and latency on completion
 * - `TimeoutLayer` - whole-request deadline; an expired request is dropped,
 *   which rolls back any open store transaction, and answered with the
 *   storage timeout error
 * - `CorsLayer::permissive` - any origin, as the mobile and web clients expect
 *
 * Unknown paths and unsupported methods get the same JSON body every other
 * error uses.
 */

use axum::{error_handling::HandleErrorLayer, BoxError, Router};
use std::time::Duration;
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::member_routes::configure_member_routes;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;

/// Create the application router
///
/// # Arguments
///
/// * `app_state` - Store and hashing pool
/// * `request_timeout` - Deadline for a whole request
pub fn create_router(app_state: AppState, request_timeout: Duration) -> Router<()> {
    let router = configure_api_routes(Router::new());
    let router = configure_member_routes(router, app_state.clone());

    router
        .fallback(|| async { BackendError::not_found("Route not found") })
        .method_not_allowed_fallback(|| async {
            BackendError::method_not_allowed("Method not allowed")
        })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}

/// Turn a failure from the middleware stack into the JSON error shape
async fn handle_layer_error(err: BoxError) -> BackendError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request deadline exceeded");
        BackendError::from(StoreError::Timeout)
    } else {
        BackendError::internal(format!("middleware failure: {}", err))
    }
}

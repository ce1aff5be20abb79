/**
 * Public Routes
 *
 * Endpoints reachable without an auth key.
 *
 * - `POST /signup` - member registration
 * - `POST /login` - member authentication
 * - `GET /checkUsername/{username}` - username availability
 * - `GET /exercises` - reference exercise catalog
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::{check_username, login, signup};
use crate::backend::resources::list_exercises;
use crate::backend::server::state::AppState;

/// Add the public routes to `router`
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/checkUsername/{username}", get(check_username))
        .route("/exercises", get(list_exercises))
}

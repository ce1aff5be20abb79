//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - auth key check for member-scoped routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use repbook::backend::middleware::{auth_middleware, AuthMember};
//! use repbook::backend::server::state::AppState;
//!
//! async fn whoami(AuthMember(member): AuthMember) -> String {
//!     member.member_id.to_string()
//! }
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/whoami/{memberId}", get(whoami))
//!         .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthMember, AuthenticatedMember};

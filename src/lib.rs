//! repbook - Fitness Member API
//!
//! Identity and authorization layer of a fitness-tracking backend. Members
//! sign up with a profile and initial body metrics, log in with an email or
//! username, and receive a long-lived auth key. Every member-scoped endpoint
//! checks that key against the member id in the request before touching the
//! member's workouts, metrics or gym membership.
//!
//! # Module Structure
//!
//! - **`shared`** - wire types and request validation
//!   - Request/response bodies and their validation rules
//!   - Resource models (profile, metrics, workouts, gym membership, exercises)
//!   - Validation error type
//!
//! - **`backend`** - server-side code (only compiled with the `ssr` feature)
//!   - Axum HTTP server and route table
//!   - bcrypt password hashing and auth keys
//!   - PostgreSQL and in-memory stores
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables `backend` and the `repbook-server` binary
//!
//! Without `ssr` only `shared` is built, which is enough for a client that
//! wants the wire types and the validation rules.
//!
//! # Error Handling
//!
//! - `shared::SharedError` for validation failures
//! - `backend::BackendError` for everything a handler can return, rendered
//!   as `{"error", "message", "status"}` JSON

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

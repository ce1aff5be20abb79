//! Backend Module
//!
//! All server-side code for the repbook member API: an Axum HTTP server that
//! registers members, authenticates them, and serves the data each member
//! owns.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - configuration, application state, initialization
//! - **`routes`** - route table and outer middleware stack
//! - **`auth`** - password hashing, auth keys, signup/login handlers
//! - **`middleware`** - auth key check for member-scoped routes
//! - **`resources`** - profile, metrics, workouts, gym membership, exercises
//! - **`store`** - `MemberStore` trait with PostgreSQL and in-memory backends
//! - **`error`** - `BackendError` and its JSON rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - repbook-server binary
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Credentials
//! ├── middleware/     - Request middleware
//! ├── resources/      - Member-scoped handlers
//! ├── store/          - Persistence
//! └── error/          - Error types
//! ```
//!
//! # Concurrency
//!
//! Each request runs on its own task. The store handle (a connection pool or
//! a lock-guarded in-memory table set) is the only shared mutable resource.
//! Nothing caches credentials: the auth middleware reads the stored key on
//! every request.
//!
//! # Example
//!
//! ```rust,no_run
//! use repbook::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and credentials
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Member-scoped resource handlers
pub mod resources;

/// Credential and resource store
pub mod store;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
pub use store::{MemberStore, MemoryStore, PgStore, SharedStore};

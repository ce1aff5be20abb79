//! Server Module
//!
//! Startup code for the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`config`** - `ServerConfig` loading (defaults, TOML file, environment)
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - store selection and application assembly
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── config.rs - Configuration loading and validation
//! ├── state.rs  - AppState and FromRef implementations
//! └── init.rs   - Store and router initialization
//! ```

/// Configuration loading
pub mod config;

/// Application state
pub mod state;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, create_state, InitError};
pub use state::AppState;

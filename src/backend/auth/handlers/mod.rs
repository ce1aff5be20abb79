//! Authentication Handlers Module
//!
//! HTTP handlers for the endpoints that issue or check credentials. None of
//! them sit behind the auth middleware.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Handler exports
//! ├── signup.rs       - Member registration
//! ├── login.rs        - Member authentication
//! └── availability.rs - Username availability check
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /signup - create a member, return id and auth key
//! - **`login`** - POST /login - verify a password, return id and auth key
//! - **`check_username`** - GET /checkUsername/{username}

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Username availability handler
pub mod availability;

pub use availability::check_username;
pub use login::login;
pub use signup::signup;

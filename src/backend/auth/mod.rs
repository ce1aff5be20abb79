//! Authentication Module
//!
//! Issues and checks member credentials.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing on a bounded blocking pool
//! - **`tokens`** - auth key generation and constant-time comparison
//! - **`handlers`** - signup, login and username availability endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: profile, password and metrics → member created → member id and auth key returned
//! 2. **Login**: email or username plus password → password verified → member id and auth key returned
//! 3. **Protected requests**: member id in the path plus `Auth-Key` header → checked by
//!    [`crate::backend::middleware::auth_middleware`]
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Auth keys are 256-bit random values and do not expire
//! - Failed logins return 401 without saying which part was wrong

/// Password hashing
pub mod password;

/// Auth key generation and comparison
pub mod tokens;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{check_username, login, signup};
pub use password::PasswordHasher;

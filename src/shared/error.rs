//! Shared Error Types
//!
//! This module defines error types that are shared between the API server and
//! its clients. These errors represent failures that can be detected without
//! touching the database, such as a missing signup field. The only kind is
//! `ValidationError`, tagged with the name of the offending field.
//!
//! # Usage
//!
//! ```rust
//! use repbook::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! assert_eq!(error.field(), "email");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Request validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        let Self::ValidationError { field, .. } = self;
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let SharedError::ValidationError { field, message } =
            SharedError::validation("email", "Invalid email format");
        assert_eq!(field, "email");
        assert_eq!(message, "Invalid email format");
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(SharedError::validation("username", "x").field(), "username");
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("password", "Password is required");
        let display = format!("{}", error);
        assert!(display.contains("password"));
        assert!(display.contains("Password is required"));
    }
}

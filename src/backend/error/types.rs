/**
 * Backend Error Types
 *
 * This module defines the error taxonomy every handler reports through.
 * Each variant maps to exactly one HTTP status and one stable `kind` string
 * that clients can match on.
 *
 * # Error Categories
 *
 * - `Validation` - missing or malformed input (400)
 * - `Unauthorized` - bad credentials, or an auth key that does not belong
 *   to the claimed member (401)
 * - `NotFound` - referenced member or resource absent (404)
 * - `Conflict` - email or username already taken (409)
 * - `MethodNotAllowed` - known path, unsupported method (405)
 * - `Storage` - database or connectivity failure (500)
 * - `Internal` - password hashing worker failure (500)
 *
 * Validation and authorization errors are raised before any store mutation.
 * Storage errors arrive as `StoreError` and are translated here, so raw
 * driver errors never reach a response body.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use repbook::backend::error::BackendError;
///
/// let err = BackendError::validation("workoutName is required");
/// assert_eq!(err.kind(), "validation_error");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or malformed request input
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Credentials or auth key rejected
    ///
    /// The message never says which part was wrong.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Referenced member or resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Uniqueness violation
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Path exists but not for this method
    #[error("Method not allowed: {message}")]
    MethodNotAllowed {
        /// Human-readable error message
        message: String,
    },

    /// Database failure; the source is logged, never returned
    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),

    /// Failure outside the store, e.g. a crashed hashing worker
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for the server log
        message: String,
    },
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// The one message used for every rejected login
    ///
    /// Unknown member and wrong password must look identical to the caller.
    pub fn invalid_credentials() -> Self {
        Self::unauthorized("Invalid credentials")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `MethodNotAllowed` - 405 Method Not Allowed
    /// - `Storage` / `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::MethodNotAllowed { .. } => "method_not_allowed",
            Self::Storage(_) => "storage_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Message that is safe to show to the client
    ///
    /// Storage and internal failures get a generic message; their details
    /// stay in the server log.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::MethodNotAllowed { message } => message.clone(),
            Self::Storage(_) => "A storage error occurred".to_string(),
            Self::Internal { .. } => "An internal error occurred".to_string(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        let SharedError::ValidationError { message, .. } = err;
        Self::validation(message)
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { field } => {
                Self::conflict(format!("{} is already registered", field))
            }
            other => Self::Storage(other),
        }
    }
}

/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "conflict",
 *   "message": "username is already registered",
 *   "status": 409
 * }
 * ```
 */

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.message(),
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Body::from("Internal Server Error"));
                *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

/// Malformed JSON bodies become validation errors with the usual error shape
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        BackendError::validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

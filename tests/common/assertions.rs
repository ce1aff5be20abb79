//! Assertions on API responses

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Assert the status and the `error` kind of a JSON error response
///
/// Returns the parsed body for further checks.
pub fn assert_error(response: &TestResponse, status: StatusCode, kind: &str) -> Value {
    assert_eq!(response.status_code(), status, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["error"], kind, "unexpected error body: {}", body);
    assert_eq!(body["status"], status.as_u16());
    body
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

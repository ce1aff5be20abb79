//! Authentication test helpers
//!
//! Signs members up through the real `/signup` endpoint and builds the
//! headers protected routes expect.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

pub const TEST_PASSWORD: &str = "hunter22!";

/// Member created through the API
#[derive(Debug, Clone)]
pub struct TestMember {
    pub member_id: i64,
    pub auth_key: String,
    pub username: String,
    pub email: String,
}

/// Complete, valid signup body
pub fn signup_body(username: &str, email: &str) -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "dateOfBirth": "1990-01-01",
        "email": email,
        "password": TEST_PASSWORD,
        "username": username,
        "heightCm": 170,
        "weightKg": 65,
        "gender": "F",
        "workoutFrequency": "Daily"
    })
}

/// Sign up `username` with a derived email and return its credentials
pub async fn signup_member(server: &TestServer, username: &str) -> TestMember {
    let email = format!("{}@example.com", username);
    let response = server
        .post("/signup")
        .json(&signup_body(username, &email))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body: Value = response.json();
    TestMember {
        member_id: body["member_id"].as_i64().expect("member_id"),
        auth_key: body["auth_key"].as_str().expect("auth_key").to_string(),
        username: username.to_string(),
        email,
    }
}

/// `Auth-Key` header
pub fn auth_key(key: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("auth-key"),
        HeaderValue::from_str(key).expect("header-safe key"),
    )
}

/// `Authorization: Bearer` header
pub fn bearer(key: &str) -> (HeaderName, HeaderValue) {
    (
        axum::http::header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", key)).expect("header-safe key"),
    )
}

/// `Member-Id` header for routes without a path segment
pub fn member_id_header(member_id: i64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("member-id"),
        HeaderValue::from(member_id),
    )
}

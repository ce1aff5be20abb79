/**
 * Signup Handler
 *
 * This module implements member registration for POST /signup.
 *
 * # Registration Process
 *
 * 1. Validate identity fields, password and initial metrics
 * 2. Hash the password on the hashing pool
 * 3. Generate a fresh auth key
 * 4. Insert the member and its first metrics snapshot in one transaction
 * 5. Return the member id and auth key
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before they reach the store
 * - Neither the password, its hash nor the auth key is ever logged
 * - Uniqueness is enforced by the store, so two concurrent signups for the
 *   same username cannot both succeed
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::tokens::generate_auth_key;
use crate::backend::error::BackendError;
use crate::backend::store::{NewMember, SharedStore};
use crate::shared::api::{AuthResponse, SignupRequest};

/// Sign up handler
///
/// # Arguments
///
/// * `State(store)` - Member store
/// * `State(hasher)` - Password hashing pool
/// * `payload` - Signup request body
///
/// # Returns
///
/// `201 Created` with the new member id and auth key
///
/// # Errors
///
/// * `400 Bad Request` - Missing or malformed field
/// * `409 Conflict` - Email or username already registered
/// * `500 Internal Server Error` - Store or hashing failure
///
/// # Example Request
///
/// ```http
/// POST /signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "firstName": "Ann",
///   "lastName": "Lee",
///   "dateOfBirth": "1990-01-01",
///   "email": "ann@x.com",
///   "password": "hunter22!",
///   "username": "annlee",
///   "heightCm": 170,
///   "weightKg": 65,
///   "gender": "F",
///   "workoutFrequency": "Daily"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "member_id": 1,
///   "auth_key": "5f1c...e9"
/// }
/// ```
pub async fn signup(
    State(store): State<SharedStore>,
    State(hasher): State<PasswordHasher>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let Json(request) = payload?;

    let input = request.validate().map_err(|e| {
        tracing::warn!("Signup rejected: {}", e);
        BackendError::from(e)
    })?;
    tracing::info!("Signup request for username: {}", input.profile.username);

    let password_hash = hasher.hash(input.password).await?;
    let auth_key = generate_auth_key();
    let username = input.profile.username.clone();

    let member = NewMember {
        profile: input.profile,
        password_hash,
        auth_key: auth_key.clone(),
    };
    let member_id = store
        .create_member(member, input.metrics)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to create member {}: {}", username, e);
            BackendError::from(e)
        })?;

    tracing::info!("Member created: {} (id {})", username, member_id);

    Ok((StatusCode::CREATED, Json(AuthResponse { member_id, auth_key })))
}

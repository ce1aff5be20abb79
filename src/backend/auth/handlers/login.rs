/**
 * Login Handler
 *
 * This module implements member authentication for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look the member up by email, or by username when no email is given
 * 2. Verify the password with bcrypt
 * 3. Return the member id and the member's auth key
 *
 * # Security
 *
 * - An unknown identifier and a wrong password produce the same 401 body
 * - An unknown identifier is verified against a decoy hash so both cases
 *   take the same time
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::password::PasswordHasher;
use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;
use crate::shared::api::{AuthResponse, LoginIdentifier, LoginRequest};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - No identifier or no password supplied
/// * `401 Unauthorized` - Unknown member or wrong password
/// * `500 Internal Server Error` - Store or hashing failure
pub async fn login(
    State(store): State<SharedStore>,
    State(hasher): State<PasswordHasher>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;
    let (identifier, password) = request.validate()?;
    let label = match &identifier {
        LoginIdentifier::Email(email) => email.as_str(),
        LoginIdentifier::Username(username) => username.as_str(),
    };
    tracing::info!("Login request for: {}", label);

    let credentials = match store.credentials(&identifier).await? {
        Some(credentials) => credentials,
        None => {
            hasher.verify_decoy(password).await?;
            tracing::warn!("Login failed for: {}", label);
            return Err(BackendError::invalid_credentials());
        }
    };

    if !hasher.verify(password, credentials.password_hash).await? {
        tracing::warn!("Login failed for: {}", label);
        return Err(BackendError::invalid_credentials());
    }

    tracing::info!("Member logged in: id {}", credentials.member_id);

    Ok(Json(AuthResponse {
        member_id: credentials.member_id,
        auth_key: credentials.auth_key,
    }))
}

//! Username availability handler for GET /checkUsername/{username}

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;
use crate::shared::api::UsernameAvailability;

/// Report whether a username is free
///
/// Uses the same case-insensitive comparison signup enforces, so a name
/// reported as taken here is always rejected by signup. Read-only.
pub async fn check_username(
    State(store): State<SharedStore>,
    Path(username): Path<String>,
) -> Result<Json<UsernameAvailability>, BackendError> {
    let taken = store.username_taken(username.trim()).await?;
    tracing::debug!("Username {} available: {}", username, !taken);
    Ok(Json(UsernameAvailability { available: !taken }))
}

/**
 * Authentication Middleware
 *
 * Guards every member-scoped route. A request names the member it acts for
 * (the `{memberId}` path segment, or the `Member-Id` header on routes without
 * one) and carries that member's auth key (`Auth-Key: <key>` or
 * `Authorization: Bearer <key>`). The key stored for the claimed member is
 * read fresh on every request and compared in constant time.
 *
 * Every failure is the same 401: missing header, malformed id, unknown
 * member, and a key that belongs to someone else all look alike.
 */

use axum::{
    extract::{rejection::RawPathParamsRejection, FromRequestParts, RawPathParams, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::tokens::keys_match;
use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;

/// Header carrying the auth key
pub const AUTH_KEY_HEADER: &str = "auth-key";

/// Header naming the member on routes without a `{memberId}` segment
pub const MEMBER_ID_HEADER: &str = "member-id";

/// Path parameter naming the member
const MEMBER_ID_PARAM: &str = "memberId";

/// Member whose auth key was verified for this request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedMember {
    pub member_id: i64,
}

/// Authentication middleware
///
/// On success the verified [`AuthenticatedMember`] is attached to the request
/// extensions for [`AuthMember`] to pick up.
///
/// # Errors
///
/// * `401 Unauthorized` - any authentication failure
/// * `500 Internal Server Error` - the store could not be read
pub async fn auth_middleware(
    State(store): State<SharedStore>,
    path_params: Result<RawPathParams, RawPathParamsRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let claimed = claimed_member_id(path_params.ok().as_ref(), request.headers())
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed member id on protected route");
            BackendError::unauthorized("Unauthorized")
        })?;

    let supplied = supplied_auth_key(request.headers())
        .map(str::to_string)
        .ok_or_else(|| {
            tracing::warn!(member_id = claimed, "Missing auth key");
            BackendError::unauthorized("Unauthorized")
        })?;

    let stored = store.auth_key(claimed).await?;
    let authorized = match stored {
        Some(stored) => keys_match(&stored, &supplied),
        None => false,
    };
    if !authorized {
        tracing::warn!(member_id = claimed, "Auth key rejected");
        return Err(BackendError::unauthorized("Unauthorized"));
    }

    request
        .extensions_mut()
        .insert(AuthenticatedMember { member_id: claimed });

    Ok(next.run(request).await)
}

/// Member id the request claims to act for
///
/// The path segment wins over the header.
fn claimed_member_id(path_params: Option<&RawPathParams>, headers: &HeaderMap) -> Option<i64> {
    let from_path = path_params.and_then(|params| {
        params
            .iter()
            .find(|(name, _)| *name == MEMBER_ID_PARAM)
            .map(|(_, value)| value.to_string())
    });

    let raw = match from_path {
        Some(value) => value,
        None => headers.get(MEMBER_ID_HEADER)?.to_str().ok()?.to_string(),
    };
    raw.trim().parse().ok()
}

/// Auth key from `Auth-Key`, falling back to `Authorization: Bearer`
fn supplied_auth_key(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(AUTH_KEY_HEADER) {
        return value.to_str().ok().map(str::trim).filter(|key| !key.is_empty());
    }

    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|key| !key.is_empty())
}

/// Axum extractor for the authenticated member
///
/// Only valid on routes behind [`auth_middleware`]; elsewhere it rejects
/// with 401.
#[derive(Clone, Copy, Debug)]
pub struct AuthMember(pub AuthenticatedMember);

impl<S> FromRequestParts<S> for AuthMember
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let member = parts
            .extensions
            .get::<AuthenticatedMember>()
            .copied()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedMember not found in request extensions");
                BackendError::unauthorized("Unauthorized")
            })?;

        Ok(AuthMember(member))
    }
}

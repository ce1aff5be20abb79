/**
 * Gym Membership Handlers
 *
 * A member has no membership or exactly one. Setting it is a single atomic
 * upsert in the store, so repeated or concurrent calls never leave two rows.
 *
 * # Routes
 *
 * - `POST /setGymMembership` - member named by the `Member-Id` header
 * - `POST /setGymMembership/{memberId}`
 * - `GET /gymMembership/{memberId}`
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthMember;
use crate::backend::store::SharedStore;
use crate::shared::api::GymMembershipRequest;
use crate::shared::models::GymMembership;

/// Insert or replace the member's gym membership
///
/// # Errors
///
/// * `400 Bad Request` - blank gym name
/// * `401 Unauthorized` - body `memberId` names a different member
pub async fn set_gym_membership(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
    payload: Result<Json<GymMembershipRequest>, JsonRejection>,
) -> Result<Json<GymMembership>, BackendError> {
    let Json(request) = payload?;

    if let Some(body_member_id) = request.member_id {
        if body_member_id != member.member_id {
            tracing::warn!(
                "Gym membership body names member {} but request is authenticated as {}",
                body_member_id,
                member.member_id
            );
            return Err(BackendError::unauthorized("Unauthorized"));
        }
    }

    let input = request.validate()?;
    let membership = store.upsert_gym_membership(member.member_id, input).await?;
    tracing::info!("Gym membership set for member {}", member.member_id);

    Ok(Json(membership))
}

/// Current gym membership
///
/// # Errors
///
/// * `404 Not Found` - the member has never set one
pub async fn gym_membership(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
) -> Result<Json<GymMembership>, BackendError> {
    store
        .gym_membership(member.member_id)
        .await?
        .map(Json)
        .ok_or_else(|| BackendError::not_found("No gym membership on record"))
}

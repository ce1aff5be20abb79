/**
 * Member Profile and Metrics Handlers
 *
 * # Routes
 *
 * - `GET /userDataAndMetrics/{memberId}` - profile plus latest metrics
 * - `POST /updateUserInfo/{memberId}` - overwrite identity fields
 * - `GET /membersMetrics/{memberId}` - every metrics snapshot, oldest first
 * - `POST /membersMetrics/{memberId}` - record a new snapshot
 *
 * All routes sit behind the auth middleware; the member id comes from
 * [`AuthMember`], never from the body.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthMember;
use crate::backend::store::SharedStore;
use crate::shared::api::{RecordMetricsRequest, UpdateProfileRequest};
use crate::shared::models::{MemberProfile, MetricsRecord, ProfileWithMetrics};

/// Profile fields plus the most recent metrics snapshot
///
/// # Errors
///
/// * `404 Not Found` - the member row is gone
pub async fn user_data_and_metrics(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
) -> Result<Json<ProfileWithMetrics>, BackendError> {
    let profile = store
        .profile(member.member_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Member not found"))?;
    let latest_metrics = store.metrics(member.member_id).await?.pop();

    Ok(Json(ProfileWithMetrics {
        profile,
        latest_metrics,
    }))
}

/// Replace first/last name, date of birth, email and username
///
/// # Errors
///
/// * `400 Bad Request` - missing or malformed field
/// * `409 Conflict` - email or username belongs to another member
/// * `404 Not Found` - the member row is gone
pub async fn update_user_info(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<MemberProfile>, BackendError> {
    let Json(request) = payload?;
    let profile = request.validate()?;

    let updated = store
        .update_profile(member.member_id, profile)
        .await
        .map_err(|e| {
            tracing::warn!("Profile update failed for member {}: {}", member.member_id, e);
            BackendError::from(e)
        })?
        .ok_or_else(|| BackendError::not_found("Member not found"))?;

    tracing::info!("Profile updated for member {}", member.member_id);
    Ok(Json(updated))
}

/// Every metrics snapshot for the member; an empty list is not an error
pub async fn members_metrics(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
) -> Result<Json<Vec<MetricsRecord>>, BackendError> {
    let rows = store.metrics(member.member_id).await?;
    if rows.is_empty() && store.profile(member.member_id).await?.is_none() {
        return Err(BackendError::not_found("Member not found"));
    }
    Ok(Json(rows))
}

/// Record a new metrics snapshot; `201 Created` with the stored row
pub async fn record_metrics(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
    payload: Result<Json<RecordMetricsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MetricsRecord>), BackendError> {
    let Json(request) = payload?;
    let metrics = request.validate()?;

    let record = store.record_metrics(member.member_id, metrics).await?;
    tracing::debug!("Metrics {} recorded for member {}", record.metric_id, member.member_id);

    Ok((StatusCode::CREATED, Json(record)))
}

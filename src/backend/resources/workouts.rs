//! Workout handlers
//!
//! - `GET /workouts/{memberId}`
//! - `POST /createWorkout/{memberId}`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthMember;
use crate::backend::store::SharedStore;
use crate::shared::api::CreateWorkoutRequest;
use crate::shared::models::Workout;

/// The member's workouts, oldest first; empty when none exist
pub async fn list_workouts(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
) -> Result<Json<Vec<Workout>>, BackendError> {
    Ok(Json(store.workouts(member.member_id).await?))
}

/// Create a workout from a name and an ordered list of exercise ids
///
/// # Errors
///
/// * `400 Bad Request` - blank name or empty exercise list
pub async fn create_workout(
    State(store): State<SharedStore>,
    AuthMember(member): AuthMember,
    payload: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Workout>), BackendError> {
    let Json(request) = payload?;
    let input = request.validate().map_err(|e| {
        tracing::warn!("Workout rejected for member {}: {}", member.member_id, e);
        BackendError::from(e)
    })?;

    let workout = store.create_workout(member.member_id, input).await?;
    tracing::info!(
        "Workout {} '{}' created for member {}",
        workout.workout_id,
        workout.workout_name,
        member.member_id
    );

    Ok((StatusCode::CREATED, Json(workout)))
}

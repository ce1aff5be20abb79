use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::store::SharedStore;
use crate::shared::models::Exercise;

/// `GET /exercises` - the reference catalog; public
///
/// An empty catalog is reported as 404 rather than an empty list.
pub async fn list_exercises(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Exercise>>, BackendError> {
    let exercises = store.exercises().await?;
    if exercises.is_empty() {
        tracing::warn!("Exercise catalog is empty");
        return Err(BackendError::not_found("No exercises found"));
    }
    Ok(Json(exercises))
}

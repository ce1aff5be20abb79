//! Member-scoped resource models
//!
//! Rows returned by the API. Field names are snake_case on the wire, matching
//! the column names the mobile client already decodes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Public profile of a member (never carries the password hash or auth key)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct MemberProfile {
    pub member_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub username: String,
    pub time_created: DateTime<Utc>,
}

/// One body-metrics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct MetricsRecord {
    pub metric_id: i64,
    pub member_id: i64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: String,
    pub workout_frequency: String,
    pub recorded_at: DateTime<Utc>,
}

/// Profile together with the most recent metrics snapshot
///
/// Body of `GET /userDataAndMetrics/{memberId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWithMetrics {
    #[serde(flatten)]
    pub profile: MemberProfile,
    pub latest_metrics: Option<MetricsRecord>,
}

/// A named, ordered list of exercises owned by one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Workout {
    pub workout_id: i64,
    pub member_id: i64,
    pub workout_name: String,
    /// Exercise ids in the order the member arranged them
    pub exercise_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

/// Gym membership details; at most one per member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct GymMembership {
    pub member_id: i64,
    pub gym: String,
    pub address: Option<String>,
    pub membership_type: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Entry of the read-only exercise catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Exercise {
    pub exercise_id: i32,
    pub name: String,
    pub muscle_group: String,
    pub difficulty: String,
    pub equipment: bool,
}

//! Member-Scoped Resources
//!
//! Handlers for the data a member owns (profile, metrics, workouts, gym
//! membership) plus the public exercise catalog. Every member-scoped handler
//! takes its member id from [`crate::backend::middleware::AuthMember`], so
//! there is no route by which one member reaches another's rows.

/// Profile and metrics
pub mod members;

/// Workouts
pub mod workouts;

/// Gym membership
pub mod gym;

/// Exercise catalog
pub mod exercises;

pub use exercises::list_exercises;
pub use gym::{gym_membership, set_gym_membership};
pub use members::{members_metrics, record_metrics, update_user_info, user_data_and_metrics};
pub use workouts::{create_workout, list_workouts};

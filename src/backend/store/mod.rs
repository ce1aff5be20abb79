//! Credential and Resource Store
//!
//! Every read and write the API performs goes through [`MemberStore`]. The
//! store is an explicitly owned handle: it is built once at startup, wrapped in
//! an `Arc` and handed to handlers through `AppState`, never reached through a
//! global.
//!
//! # Backends
//!
//! - [`PgStore`] - PostgreSQL via a sqlx connection pool (production)
//! - [`MemoryStore`] - lock-guarded tables in process memory (tests, and the
//!   fallback when no `DATABASE_URL` is configured)
//!
//! # Guarantees every backend upholds
//!
//! - `create_member` writes the member and its first metrics row atomically:
//!   both rows exist afterwards, or neither does.
//! - Email and username are unique, compared case-insensitively. The same
//!   comparison is used by `username_taken` and the login lookups.
//! - `upsert_gym_membership` is a single atomic operation; two concurrent
//!   calls for one member leave exactly one row.

use async_trait::async_trait;
use sqlx::FromRow;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::shared::api::{GymMembershipInput, LoginIdentifier, MetricsInput, ProfileInput, WorkoutInput};
use crate::shared::models::{Exercise, GymMembership, MemberProfile, MetricsRecord, Workout};

/// Reference exercise catalog
pub mod catalog;

/// In-memory backend
pub mod memory;

/// PostgreSQL backend
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store handle shared by all request handlers
pub type SharedStore = Arc<dyn MemberStore>;

/// Member row to insert at signup
#[derive(Clone)]
pub struct NewMember {
    pub profile: ProfileInput,
    pub password_hash: String,
    pub auth_key: String,
}

impl fmt::Debug for NewMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewMember")
            .field("profile", &self.profile)
            .field("password_hash", &"<redacted>")
            .field("auth_key", &"<redacted>")
            .finish()
    }
}

/// What login needs to know about a member
#[derive(Clone, FromRow)]
pub struct Credentials {
    pub member_id: i64,
    pub password_hash: String,
    pub auth_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("member_id", &self.member_id)
            .field("password_hash", &"<redacted>")
            .field("auth_key", &"<redacted>")
            .finish()
    }
}

/// Store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique column already holds this value
    #[error("{field} already exists")]
    Conflict {
        /// Which unique value collided (`email`, `username`, ...)
        field: String,
    },

    /// The pool or the statement ran past its deadline
    #[error("store call exceeded its deadline")]
    Timeout,

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Schema migration failure at startup
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Postgres error code for `statement_timeout` cancellations
const QUERY_CANCELED: &str = "57014";

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => return StoreError::Timeout,
            sqlx::Error::Database(db) => {
                if db.is_unique_violation() {
                    return StoreError::Conflict {
                        field: conflict_field(db.constraint()).to_string(),
                    };
                }
                if db.code().as_deref() == Some(QUERY_CANCELED) {
                    return StoreError::Timeout;
                }
            }
            _ => {}
        }
        StoreError::Database(err)
    }
}

/// Map a unique constraint name to the field clients know it by
fn conflict_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("email") => "email",
        Some(name) if name.contains("username") => "username",
        _ => "member",
    }
}

/// Storage operations behind every endpoint
///
/// All member-scoped methods take the member id the auth middleware has
/// already verified; none of them can reach another member's rows.
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Insert a member and its first metrics snapshot as one unit
    async fn create_member(&self, member: NewMember, metrics: MetricsInput) -> Result<i64, StoreError>;

    async fn credentials_by_email(&self, email: &str) -> Result<Option<Credentials>, StoreError>;

    async fn credentials_by_username(&self, username: &str) -> Result<Option<Credentials>, StoreError>;

    /// Stored auth key for a member, `None` if the member does not exist
    async fn auth_key(&self, member_id: i64) -> Result<Option<String>, StoreError>;

    async fn username_taken(&self, username: &str) -> Result<bool, StoreError>;

    async fn profile(&self, member_id: i64) -> Result<Option<MemberProfile>, StoreError>;

    /// Overwrite the identity fields; `None` if the member does not exist
    async fn update_profile(
        &self,
        member_id: i64,
        profile: ProfileInput,
    ) -> Result<Option<MemberProfile>, StoreError>;

    /// All metrics snapshots, oldest first
    async fn metrics(&self, member_id: i64) -> Result<Vec<MetricsRecord>, StoreError>;

    async fn record_metrics(&self, member_id: i64, metrics: MetricsInput) -> Result<MetricsRecord, StoreError>;

    /// All workouts, oldest first
    async fn workouts(&self, member_id: i64) -> Result<Vec<Workout>, StoreError>;

    async fn create_workout(&self, member_id: i64, workout: WorkoutInput) -> Result<Workout, StoreError>;

    /// Insert the membership, or update the existing row in place
    async fn upsert_gym_membership(
        &self,
        member_id: i64,
        membership: GymMembershipInput,
    ) -> Result<GymMembership, StoreError>;

    async fn gym_membership(&self, member_id: i64) -> Result<Option<GymMembership>, StoreError>;

    /// The read-only exercise catalog
    async fn exercises(&self) -> Result<Vec<Exercise>, StoreError>;

    /// Look a member up by whichever identifier they logged in with
    async fn credentials(&self, identifier: &LoginIdentifier) -> Result<Option<Credentials>, StoreError> {
        match identifier {
            LoginIdentifier::Email(email) => self.credentials_by_email(email).await,
            LoginIdentifier::Username(username) => self.credentials_by_username(username).await,
        }
    }
}

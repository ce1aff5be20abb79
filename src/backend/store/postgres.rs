/**
 * PostgreSQL Store
 *
 * `MemberStore` backed by a sqlx connection pool. Schema lives in
 * `migrations/` and is applied with [`PgStore::migrate`] at startup.
 *
 * # Deadlines
 *
 * Every connection is opened with a server-side `statement_timeout`, and the
 * pool gives up waiting for a free connection after `acquire_timeout`. Both
 * surface as `StoreError::Timeout`.
 */

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;
use std::time::Duration;

use crate::backend::store::{Credentials, MemberStore, NewMember, StoreError};
use crate::shared::api::{GymMembershipInput, MetricsInput, ProfileInput, WorkoutInput};
use crate::shared::models::{Exercise, GymMembership, MemberProfile, MetricsRecord, Workout};

/// Pool sizing and deadlines
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

/// PostgreSQL `MemberStore`
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`
    ///
    /// # Errors
    ///
    /// Fails if the URL does not parse or no connection can be established.
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, StoreError> {
        let statement_timeout_ms = settings.statement_timeout.as_millis().to_string();
        let options = PgConnectOptions::from_str(database_url)?
            .options([("statement_timeout", statement_timeout_ms)]);

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await?;

        tracing::info!(
            max_connections = settings.max_connections,
            "Database connection pool created"
        );
        Ok(Self::new(pool))
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!().run(&self.pool).await.map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            StoreError::from(e)
        })?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const PROFILE_COLUMNS: &str =
    "member_id, first_name, last_name, date_of_birth, email, username, time_created";

#[async_trait]
impl MemberStore for PgStore {
    async fn create_member(&self, member: NewMember, metrics: MetricsInput) -> Result<i64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let member_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO members (first_name, last_name, date_of_birth, email, username, password_hash, auth_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING member_id
            "#,
        )
        .bind(&member.profile.first_name)
        .bind(&member.profile.last_name)
        .bind(member.profile.date_of_birth)
        .bind(&member.profile.email)
        .bind(&member.profile.username)
        .bind(&member.password_hash)
        .bind(&member.auth_key)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO members_metrics (member_id, height_cm, weight_kg, gender, workout_frequency)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member_id)
        .bind(metrics.height_cm)
        .bind(metrics.weight_kg)
        .bind(&metrics.gender)
        .bind(&metrics.workout_frequency)
        .execute(&mut *tx)
        .await?;

        // Dropping `tx` on any early return above rolls both inserts back
        tx.commit().await?;
        Ok(member_id)
    }

    async fn credentials_by_email(&self, email: &str) -> Result<Option<Credentials>, StoreError> {
        let credentials = sqlx::query_as::<_, Credentials>(
            r#"SELECT member_id, password_hash, auth_key FROM members WHERE LOWER(email COLLATE "C") = LOWER($1 COLLATE "C")"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credentials)
    }

    async fn credentials_by_username(&self, username: &str) -> Result<Option<Credentials>, StoreError> {
        let credentials = sqlx::query_as::<_, Credentials>(
            "SELECT member_id, password_hash, auth_key FROM members WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credentials)
    }

    async fn auth_key(&self, member_id: i64) -> Result<Option<String>, StoreError> {
        let key = sqlx::query_scalar("SELECT auth_key FROM members WHERE member_id = $1")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(key)
    }

    async fn username_taken(&self, username: &str) -> Result<bool, StoreError> {
        let taken = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM members WHERE LOWER(username) = LOWER($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn profile(&self, member_id: i64) -> Result<Option<MemberProfile>, StoreError> {
        let query = format!("SELECT {} FROM members WHERE member_id = $1", PROFILE_COLUMNS);
        let profile = sqlx::query_as::<_, MemberProfile>(&query)
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(profile)
    }

    async fn update_profile(
        &self,
        member_id: i64,
        profile: ProfileInput,
    ) -> Result<Option<MemberProfile>, StoreError> {
        let query = format!(
            r#"
            UPDATE members
            SET first_name = $2, last_name = $3, date_of_birth = $4, email = $5, username = $6
            WHERE member_id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );
        let updated = sqlx::query_as::<_, MemberProfile>(&query)
            .bind(member_id)
            .bind(&profile.first_name)
            .bind(&profile.last_name)
            .bind(profile.date_of_birth)
            .bind(&profile.email)
            .bind(&profile.username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn metrics(&self, member_id: i64) -> Result<Vec<MetricsRecord>, StoreError> {
        let rows = sqlx::query_as::<_, MetricsRecord>(
            r#"
            SELECT metric_id, member_id, height_cm, weight_kg, gender, workout_frequency, recorded_at
            FROM members_metrics
            WHERE member_id = $1
            ORDER BY recorded_at, metric_id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn record_metrics(&self, member_id: i64, metrics: MetricsInput) -> Result<MetricsRecord, StoreError> {
        let record = sqlx::query_as::<_, MetricsRecord>(
            r#"
            INSERT INTO members_metrics (member_id, height_cm, weight_kg, gender, workout_frequency)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING metric_id, member_id, height_cm, weight_kg, gender, workout_frequency, recorded_at
            "#,
        )
        .bind(member_id)
        .bind(metrics.height_cm)
        .bind(metrics.weight_kg)
        .bind(&metrics.gender)
        .bind(&metrics.workout_frequency)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn workouts(&self, member_id: i64) -> Result<Vec<Workout>, StoreError> {
        let rows = sqlx::query_as::<_, Workout>(
            r#"
            SELECT workout_id, member_id, workout_name, exercise_ids, created_at
            FROM workouts
            WHERE member_id = $1
            ORDER BY created_at, workout_id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_workout(&self, member_id: i64, workout: WorkoutInput) -> Result<Workout, StoreError> {
        let row = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (member_id, workout_name, exercise_ids)
            VALUES ($1, $2, $3)
            RETURNING workout_id, member_id, workout_name, exercise_ids, created_at
            "#,
        )
        .bind(member_id)
        .bind(&workout.workout_name)
        .bind(&workout.exercise_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert_gym_membership(
        &self,
        member_id: i64,
        membership: GymMembershipInput,
    ) -> Result<GymMembership, StoreError> {
        let row = sqlx::query_as::<_, GymMembership>(
            r#"
            INSERT INTO gym_memberships (member_id, gym, address, membership_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (member_id) DO UPDATE
            SET gym = EXCLUDED.gym,
                address = EXCLUDED.address,
                membership_type = EXCLUDED.membership_type,
                updated_at = now()
            RETURNING member_id, gym, address, membership_type, updated_at
            "#,
        )
        .bind(member_id)
        .bind(&membership.gym)
        .bind(&membership.address)
        .bind(&membership.membership_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn gym_membership(&self, member_id: i64) -> Result<Option<GymMembership>, StoreError> {
        let row = sqlx::query_as::<_, GymMembership>(
            r#"
            SELECT member_id, gym, address, membership_type, updated_at
            FROM gym_memberships
            WHERE member_id = $1
            "#,
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        let rows = sqlx::query_as::<_, Exercise>(
            "SELECT exercise_id, name, muscle_group, difficulty, equipment FROM exercises ORDER BY exercise_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

//! In-memory store
//!
//! All tables live behind one `RwLock`, so every write is atomic with respect
//! to every other: signup's two inserts and the gym upsert happen under a
//! single write guard. Used by the test suite and as the fallback backend when
//! no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::store::{catalog, Credentials, MemberStore, NewMember, StoreError};
use crate::shared::api::{GymMembershipInput, MetricsInput, ProfileInput, WorkoutInput};
use crate::shared::models::{Exercise, GymMembership, MemberProfile, MetricsRecord, Workout};

struct MemberRow {
    profile: MemberProfile,
    password_hash: String,
    auth_key: String,
}

impl MemberRow {
    fn credentials(&self) -> Credentials {
        Credentials {
            member_id: self.profile.member_id,
            password_hash: self.password_hash.clone(),
            auth_key: self.auth_key.clone(),
        }
    }
}

#[derive(Default)]
struct Tables {
    last_member_id: i64,
    last_metric_id: i64,
    last_workout_id: i64,
    members: BTreeMap<i64, MemberRow>,
    metrics: Vec<MetricsRecord>,
    workouts: Vec<Workout>,
    gym_memberships: HashMap<i64, GymMembership>,
    exercises: Vec<Exercise>,
}

impl Tables {
    /// First unique field `profile` would collide on, ignoring `except`
    fn collision(&self, profile: &ProfileInput, except: Option<i64>) -> Option<&'static str> {
        let email = profile.email.to_ascii_lowercase();
        let username = profile.username.to_ascii_lowercase();
        self.members
            .values()
            .filter(|row| Some(row.profile.member_id) != except)
            .find_map(|row| {
                if row.profile.email.to_ascii_lowercase() == email {
                    Some("email")
                } else if row.profile.username.to_ascii_lowercase() == username {
                    Some("username")
                } else {
                    None
                }
            })
    }

    fn push_metrics(&mut self, member_id: i64, metrics: MetricsInput) -> MetricsRecord {
        self.last_metric_id += 1;
        let record = MetricsRecord {
            metric_id: self.last_metric_id,
            member_id,
            height_cm: metrics.height_cm,
            weight_kg: metrics.weight_kg,
            gender: metrics.gender,
            workout_frequency: metrics.workout_frequency,
            recorded_at: Utc::now(),
        };
        self.metrics.push(record.clone());
        record
    }
}

/// In-memory `MemberStore`
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Empty store with an empty exercise catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store serving the reference exercise catalog
    pub fn with_reference_catalog() -> Self {
        Self::with_exercises(catalog::reference_exercises())
    }

    pub fn with_exercises(exercises: Vec<Exercise>) -> Self {
        let tables = Tables {
            exercises,
            ..Tables::default()
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Number of gym membership rows held for a member
    pub async fn gym_membership_rows(&self, member_id: i64) -> usize {
        let tables = self.tables.read().await;
        usize::from(tables.gym_memberships.contains_key(&member_id))
    }

    /// Number of members stored
    pub async fn member_count(&self) -> usize {
        self.tables.read().await.members.len()
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn create_member(&self, member: NewMember, metrics: MetricsInput) -> Result<i64, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(field) = tables.collision(&member.profile, None) {
            return Err(StoreError::Conflict {
                field: field.to_string(),
            });
        }
        if tables.members.values().any(|row| row.auth_key == member.auth_key) {
            return Err(StoreError::Conflict {
                field: "member".to_string(),
            });
        }

        tables.last_member_id += 1;
        let member_id = tables.last_member_id;
        let profile = member.profile;
        tables.members.insert(
            member_id,
            MemberRow {
                profile: MemberProfile {
                    member_id,
                    first_name: profile.first_name,
                    last_name: profile.last_name,
                    date_of_birth: profile.date_of_birth,
                    email: profile.email,
                    username: profile.username,
                    time_created: Utc::now(),
                },
                password_hash: member.password_hash,
                auth_key: member.auth_key,
            },
        );
        tables.push_metrics(member_id, metrics);
        Ok(member_id)
    }

    async fn credentials_by_email(&self, email: &str) -> Result<Option<Credentials>, StoreError> {
        let email = email.to_ascii_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .find(|row| row.profile.email.to_ascii_lowercase() == email)
            .map(MemberRow::credentials))
    }

    async fn credentials_by_username(&self, username: &str) -> Result<Option<Credentials>, StoreError> {
        let username = username.to_ascii_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .members
            .values()
            .find(|row| row.profile.username.to_ascii_lowercase() == username)
            .map(MemberRow::credentials))
    }

    async fn auth_key(&self, member_id: i64) -> Result<Option<String>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.members.get(&member_id).map(|row| row.auth_key.clone()))
    }

    async fn username_taken(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.credentials_by_username(username).await?.is_some())
    }

    async fn profile(&self, member_id: i64) -> Result<Option<MemberProfile>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.members.get(&member_id).map(|row| row.profile.clone()))
    }

    async fn update_profile(
        &self,
        member_id: i64,
        profile: ProfileInput,
    ) -> Result<Option<MemberProfile>, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.members.contains_key(&member_id) {
            return Ok(None);
        }
        if let Some(field) = tables.collision(&profile, Some(member_id)) {
            return Err(StoreError::Conflict {
                field: field.to_string(),
            });
        }

        let row = match tables.members.get_mut(&member_id) {
            Some(row) => row,
            None => return Ok(None),
        };
        row.profile.first_name = profile.first_name;
        row.profile.last_name = profile.last_name;
        row.profile.date_of_birth = profile.date_of_birth;
        row.profile.email = profile.email;
        row.profile.username = profile.username;
        Ok(Some(row.profile.clone()))
    }

    async fn metrics(&self, member_id: i64) -> Result<Vec<MetricsRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .metrics
            .iter()
            .filter(|record| record.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn record_metrics(&self, member_id: i64, metrics: MetricsInput) -> Result<MetricsRecord, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.push_metrics(member_id, metrics))
    }

    async fn workouts(&self, member_id: i64) -> Result<Vec<Workout>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .workouts
            .iter()
            .filter(|workout| workout.member_id == member_id)
            .cloned()
            .collect())
    }

    async fn create_workout(&self, member_id: i64, workout: WorkoutInput) -> Result<Workout, StoreError> {
        let mut tables = self.tables.write().await;
        tables.last_workout_id += 1;
        let workout = Workout {
            workout_id: tables.last_workout_id,
            member_id,
            workout_name: workout.workout_name,
            exercise_ids: workout.exercise_ids,
            created_at: Utc::now(),
        };
        tables.workouts.push(workout.clone());
        Ok(workout)
    }

    async fn upsert_gym_membership(
        &self,
        member_id: i64,
        membership: GymMembershipInput,
    ) -> Result<GymMembership, StoreError> {
        let mut tables = self.tables.write().await;
        let row = GymMembership {
            member_id,
            gym: membership.gym,
            address: membership.address,
            membership_type: membership.membership_type,
            updated_at: Utc::now(),
        };
        tables.gym_memberships.insert(member_id, row.clone());
        Ok(row)
    }

    async fn gym_membership(&self, member_id: i64) -> Result<Option<GymMembership>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.gym_memberships.get(&member_id).cloned())
    }

    async fn exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        Ok(self.tables.read().await.exercises.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn profile(email: &str, username: &str) -> ProfileInput {
        ProfileInput {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: email.to_string(),
            username: username.to_string(),
        }
    }

    fn member(email: &str, username: &str, auth_key: &str) -> NewMember {
        NewMember {
            profile: profile(email, username),
            password_hash: "hash".to_string(),
            auth_key: auth_key.to_string(),
        }
    }

    fn metrics() -> MetricsInput {
        MetricsInput {
            height_cm: 170.0,
            weight_kg: 65.0,
            gender: "F".to_string(),
            workout_frequency: "Daily".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_member_writes_metrics() {
        let store = MemoryStore::new();
        let member_id = store
            .create_member(member("ann@x.com", "annlee", "k1"), metrics())
            .await
            .unwrap();

        assert_eq!(member_id, 1);
        let rows = store.metrics(member_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].member_id, member_id);
    }

    #[tokio::test]
    async fn test_duplicate_username_leaves_nothing_behind() {
        let store = MemoryStore::new();
        store
            .create_member(member("ann@x.com", "annlee", "k1"), metrics())
            .await
            .unwrap();

        let err = store
            .create_member(member("other@x.com", "AnnLee", "k2"), metrics())
            .await
            .unwrap_err();

        assert_matches!(err, StoreError::Conflict { ref field } if field == "username");
        assert_eq!(store.member_count().await, 1);
        assert!(store.metrics(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let store = MemoryStore::new();
        store
            .create_member(member("ann@x.com", "annlee", "k1"), metrics())
            .await
            .unwrap();

        let err = store
            .create_member(member("ANN@X.COM", "someone", "k2"), metrics())
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Conflict { ref field } if field == "email");
    }

    #[tokio::test]
    async fn test_email_case_folding_is_ascii_only() {
        let store = MemoryStore::new();
        store
            .create_member(member("émile@x.com", "emile", "k1"), metrics())
            .await
            .unwrap();

        // Same folding as LOWER(email COLLATE "C"): only A-Z change case
        store
            .create_member(member("Émile@x.com", "emile2", "k2"), metrics())
            .await
            .unwrap();
        let err = store
            .create_member(member("éMILE@X.COM", "emile3", "k3"), metrics())
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Conflict { ref field } if field == "email");

        let found = store.credentials_by_email("ÉMILE@x.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_username_taken_matches_signup_rule() {
        let store = MemoryStore::new();
        store
            .create_member(member("ann@x.com", "annlee", "k1"), metrics())
            .await
            .unwrap();

        assert!(store.username_taken("annlee").await.unwrap());
        assert!(store.username_taken("ANNLEE").await.unwrap());
        assert!(!store.username_taken("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_gym_upsert_keeps_one_row() {
        let store = MemoryStore::new();
        let first = GymMembershipInput {
            gym: "Iron Temple".to_string(),
            address: None,
            membership_type: Some("Monthly".to_string()),
        };
        let second = GymMembershipInput {
            gym: "Steel Works".to_string(),
            address: Some("1 Main St".to_string()),
            membership_type: Some("Annual".to_string()),
        };

        store.upsert_gym_membership(1, first).await.unwrap();
        store.upsert_gym_membership(1, second).await.unwrap();

        assert_eq!(store.gym_membership_rows(1).await, 1);
        let row = store.gym_membership(1).await.unwrap().unwrap();
        assert_eq!(row.gym, "Steel Works");
    }

    #[tokio::test]
    async fn test_concurrent_gym_upserts_keep_one_row() {
        let store = MemoryStore::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .upsert_gym_membership(
                        9,
                        GymMembershipInput {
                            gym: format!("Gym {}", i),
                            address: None,
                            membership_type: None,
                        },
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.gym_membership_rows(9).await, 1);
    }

    #[tokio::test]
    async fn test_update_profile_conflict_with_other_member() {
        let store = MemoryStore::new();
        let ann = store
            .create_member(member("ann@x.com", "annlee", "k1"), metrics())
            .await
            .unwrap();
        store
            .create_member(member("bob@x.com", "bobby", "k2"), metrics())
            .await
            .unwrap();

        let err = store
            .update_profile(ann, profile("bob@x.com", "annlee"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::Conflict { ref field } if field == "email");

        // Keeping one's own email is not a conflict
        let updated = store
            .update_profile(ann, profile("ann@x.com", "ann_lee"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.username, "ann_lee");
    }

    #[tokio::test]
    async fn test_workouts_are_scoped_to_member() {
        let store = MemoryStore::new();
        store
            .create_workout(
                1,
                WorkoutInput {
                    workout_name: "Leg Day".to_string(),
                    exercise_ids: vec![1, 2, 3],
                },
            )
            .await
            .unwrap();

        assert_eq!(store.workouts(1).await.unwrap().len(), 1);
        assert!(store.workouts(2).await.unwrap().is_empty());
    }
}

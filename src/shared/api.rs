//! API Request and Response Types
//!
//! Wire types for every endpoint, plus the validation that turns a loosely
//! typed request body into a checked input. Request bodies use the camelCase
//! field names the mobile client sends (`firstName`, `heightCm`, ...); every
//! field is optional at the serde level so that a missing field surfaces as a
//! `ValidationError` naming the field instead of a generic decode failure.
//!
//! Validation is pure: nothing here touches the database, so a request that
//! fails validation never reaches a store mutation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Minimum password length accepted at signup
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest password bcrypt hashes in full; it ignores every byte past this
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Sign up request
///
/// Identity fields and the initial metrics snapshot are required together.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<String>,
    pub workout_frequency: Option<String>,
}

/// Checked identity fields shared by signup and profile updates
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub username: String,
}

/// Checked metrics snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsInput {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: String,
    pub workout_frequency: String,
}

/// Signup request after validation
#[derive(Debug, Clone, PartialEq)]
pub struct SignupInput {
    pub profile: ProfileInput,
    pub password: String,
    pub metrics: MetricsInput,
}

impl SignupRequest {
    /// Validate the request
    ///
    /// Identity fields are checked before metrics fields, so the first
    /// missing identity field is reported even if metrics are also absent.
    pub fn validate(self) -> Result<SignupInput, SharedError> {
        let profile = validate_profile(
            self.first_name,
            self.last_name,
            self.date_of_birth,
            self.email,
            self.username,
        )?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| SharedError::validation("password", "Password is required"))?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES),
            ));
        }
        let metrics = validate_metrics(
            self.height_cm,
            self.weight_kg,
            self.gender,
            self.workout_frequency,
        )?;

        Ok(SignupInput {
            profile,
            password,
            metrics,
        })
    }
}

/// Login request
///
/// Exactly one identifier is needed; when both are sent, email wins.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// How a member identifies themselves at login
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Email(String),
    Username(String),
}

impl LoginRequest {
    /// Validate the request into an identifier and a password
    pub fn validate(self) -> Result<(LoginIdentifier, String), SharedError> {
        let identifier = match (non_blank(self.email), non_blank(self.username)) {
            (Some(email), _) => LoginIdentifier::Email(email),
            (None, Some(username)) => LoginIdentifier::Username(username),
            (None, None) => {
                return Err(SharedError::validation(
                    "email",
                    "Email or username is required",
                ))
            }
        };
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| SharedError::validation("password", "Password is required"))?;
        Ok((identifier, password))
    }
}

/// Auth response
///
/// Returned by signup and login. The auth key is long-lived: login hands back
/// the key issued at signup rather than minting a new one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub member_id: i64,
    pub auth_key: String,
}

/// Username availability
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernameAvailability {
    pub available: bool,
}

/// Profile update request (`POST /updateUserInfo/{memberId}`)
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(self) -> Result<ProfileInput, SharedError> {
        validate_profile(
            self.first_name,
            self.last_name,
            self.date_of_birth,
            self.email,
            self.username,
        )
    }
}

/// New metrics snapshot (`POST /membersMetrics/{memberId}`)
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetricsRequest {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<String>,
    pub workout_frequency: Option<String>,
}

impl RecordMetricsRequest {
    pub fn validate(self) -> Result<MetricsInput, SharedError> {
        validate_metrics(
            self.height_cm,
            self.weight_kg,
            self.gender,
            self.workout_frequency,
        )
    }
}

/// Create workout request (`POST /createWorkout/{memberId}`)
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub workout_name: Option<String>,
    pub exercise_ids: Option<Vec<i32>>,
}

/// Checked workout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutInput {
    pub workout_name: String,
    pub exercise_ids: Vec<i32>,
}

impl CreateWorkoutRequest {
    pub fn validate(self) -> Result<WorkoutInput, SharedError> {
        let workout_name = required("workoutName", self.workout_name)?;
        let exercise_ids = self
            .exercise_ids
            .filter(|ids| !ids.is_empty())
            .ok_or_else(|| {
                SharedError::validation("exerciseIds", "At least one exercise is required")
            })?;
        Ok(WorkoutInput {
            workout_name,
            exercise_ids,
        })
    }
}

/// Gym membership request (`POST /setGymMembership`)
///
/// `memberId` is accepted for compatibility with the reference client. When
/// present it must equal the authenticated member.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GymMembershipRequest {
    pub member_id: Option<i64>,
    pub gym: Option<String>,
    pub address: Option<String>,
    pub membership_type: Option<String>,
}

/// Checked gym membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GymMembershipInput {
    pub gym: String,
    pub address: Option<String>,
    pub membership_type: Option<String>,
}

impl GymMembershipRequest {
    pub fn validate(self) -> Result<GymMembershipInput, SharedError> {
        Ok(GymMembershipInput {
            gym: required("gym", self.gym)?,
            address: non_blank(self.address),
            membership_type: non_blank(self.membership_type),
        })
    }
}

/// Validate a username
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Basic email shape check: something on both sides of a single `@`
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

fn validate_profile(
    first_name: Option<String>,
    last_name: Option<String>,
    date_of_birth: Option<String>,
    email: Option<String>,
    username: Option<String>,
) -> Result<ProfileInput, SharedError> {
    let first_name = required("firstName", first_name)?;
    let last_name = required("lastName", last_name)?;
    let date_of_birth = required("dateOfBirth", date_of_birth)?;
    let date_of_birth = NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d").map_err(|_| {
        SharedError::validation("dateOfBirth", "Date of birth must be formatted YYYY-MM-DD")
    })?;
    let email = required("email", email)?;
    if !is_valid_email(&email) {
        return Err(SharedError::validation("email", "Invalid email format"));
    }
    let username = required("username", username)?;
    if !is_valid_username(&username) {
        return Err(SharedError::validation(
            "username",
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    Ok(ProfileInput {
        first_name,
        last_name,
        date_of_birth,
        email,
        username,
    })
}

fn validate_metrics(
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    gender: Option<String>,
    workout_frequency: Option<String>,
) -> Result<MetricsInput, SharedError> {
    let height_cm = positive("heightCm", height_cm)?;
    let weight_kg = positive("weightKg", weight_kg)?;
    let gender = required("gender", gender)?;
    let workout_frequency = required("workoutFrequency", workout_frequency)?;
    Ok(MetricsInput {
        height_cm,
        weight_kg,
        gender,
        workout_frequency,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(field: &str, value: Option<String>) -> Result<String, SharedError> {
    non_blank(value).ok_or_else(|| SharedError::validation(field, format!("{} is required", field)))
}

fn positive(field: &str, value: Option<f64>) -> Result<f64, SharedError> {
    match value {
        None => Err(SharedError::validation(field, format!("{} is required", field))),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(_) => Err(SharedError::validation(
            field,
            format!("{} must be a positive number", field),
        )),
    }
}

//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the API server and its clients. These types are used for serialization
//! over HTTP/JSON and compile without the `ssr` feature.
//!
//! # Overview
//!
//! - **`api`** - Request/response bodies and their validation
//! - **`models`** - Member-scoped resource rows (profile, metrics, workouts, ...)
//! - **`error`** - Validation errors

/// Request and response types
pub mod api;

/// Resource models
pub mod models;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use api::{
    AuthResponse, CreateWorkoutRequest, GymMembershipRequest, LoginIdentifier, LoginRequest,
    RecordMetricsRequest, SignupRequest, UpdateProfileRequest, UsernameAvailability,
};
pub use error::SharedError;
pub use models::{Exercise, GymMembership, MemberProfile, MetricsRecord, ProfileWithMetrics, Workout};

//! Common test utilities and helpers
//!
//! - In-memory application fixture
//! - Member signup helpers and auth headers
//! - Assertions on the JSON error body
#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;

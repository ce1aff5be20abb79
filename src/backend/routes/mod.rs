//! Route Configuration Module
//!
//! Configures every HTTP route of the member API.
//!
//! # Architecture
//!
//! - **`router`** - router assembly and the outer middleware stack
//! - **`api_routes`** - public endpoints (signup, login, availability, catalog)
//! - **`member_routes`** - member-scoped endpoints behind the auth middleware
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Main router creation
//! ├── api_routes.rs    - Public routes
//! └── member_routes.rs - Authenticated routes
//! ```
//!
//! # Route Table
//!
//! ## Public
//!
//! - `POST /signup`
//! - `POST /login`
//! - `GET /checkUsername/{username}`
//! - `GET /exercises`
//!
//! ## Authenticated (`Auth-Key` header)
//!
//! - `GET /userDataAndMetrics/{memberId}`
//! - `POST /updateUserInfo/{memberId}`
//! - `GET /membersMetrics/{memberId}`, `POST /membersMetrics/{memberId}`
//! - `GET /workouts/{memberId}`
//! - `POST /createWorkout/{memberId}`
//! - `POST /setGymMembership` (`Member-Id` header), `POST /setGymMembership/{memberId}`
//! - `GET /gymMembership/{memberId}`

/// Main router creation
pub mod router;

/// Public routes
pub mod api_routes;

/// Authenticated routes
pub mod member_routes;

pub use router::create_router;

//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and domain rules and give HTTP
//! handlers (and the admin CLI) a small, typed API. Each service is generic
//! over its repository traits so unit tests can drive them with `mockall`
//! mocks, while [`crate::state::AppState`] holds them over trait objects.
//!
//! # Available Services
//!
//! - [`services::analytics_service::AnalyticsService`] - Analytics report and dashboard counters
//! - [`services::auth_service::AuthService`] - Session resolution, login and logout
//! - [`services::user_service::UserService`] - Registration and account lookup

pub mod services;

//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod health;

pub use analytics::analytics_handler;
pub use auth::{login_handler, logout_handler, register_handler};
pub use dashboard::dashboard_handler;
pub use health::health_handler;

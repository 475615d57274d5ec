//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs are validated with `validator`; response DTOs serialize with
//! camelCase field names.

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod health;

//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx with
//! runtime-checked queries mapped through `FromRow` row types.
//!
//! # Repositories
//!
//! - [`PgAnalyticsRepository`] - Shortlinks, link lists and click events for reporting
//! - [`PgUserRepository`] - User accounts
//! - [`PgSessionRepository`] - Login sessions

pub mod pg_analytics_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;

//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. The
//! PostgreSQL implementations live in `crate::infrastructure::persistence`;
//! mock implementations are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`AnalyticsRepository`] - Read-only queries behind the analytics report
//! - [`UserRepository`] - Account lookup and creation
//! - [`SessionRepository`] - Login session storage
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod analytics_repository;
pub mod session_repository;
pub mod user_repository;

pub use analytics_repository::AnalyticsRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

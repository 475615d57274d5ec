//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_user.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user whose email or username matches either argument.
    ///
    /// Used to detect duplicates before registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AppError>;

    /// Finds a user by username or email (login identifier).
    ///
    /// Email comparison is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError>;

    /// Finds a user by database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Lists users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError>;

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}

//! Repository trait for login sessions.

use crate::domain::entities::{ActiveSession, NewSession, Session};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for login sessions.
///
/// Sessions are keyed by the HMAC of their token; raw tokens are never stored.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_session.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError>;

    /// Looks up a session by token hash that has not expired at `now`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ActiveSession))` if the session exists and is still valid
    /// - `Ok(None)` if it is unknown or expired
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveSession>, AppError>;

    /// Updates the `last_seen_at` timestamp of a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch(&self, session_id: i64) -> Result<(), AppError>;

    /// Deletes a session (logout).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, session_id: i64) -> Result<(), AppError>;

    /// Deletes all sessions expired at `now`, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;
}

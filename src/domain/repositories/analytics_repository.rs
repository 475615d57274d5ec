//! Repository trait for the analytics read model.

use crate::domain::entities::{ClickEvent, LinkList, ShortlinkSummary};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Read-only queries over a user's links and click history.
///
/// The three queries are independent and may be issued concurrently; callers
/// do not expect them to observe a single snapshot.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Lists every shortlink owned by the user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_shortlinks(&self, user_id: i64) -> Result<Vec<ShortlinkSummary>, AppError>;

    /// Lists every link list owned by the user together with its items.
    ///
    /// Items keep their display order within each list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_link_lists_with_items(&self, user_id: i64) -> Result<Vec<LinkList>, AppError>;

    /// Lists click events on the user's shortlinks and list items recorded at
    /// or after `since`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_click_events(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError>;
}

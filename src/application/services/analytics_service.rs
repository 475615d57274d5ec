//! Analytics report service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::analytics::{AnalyticsReport, AnalyticsWindow, Overview, build_report, summarize};
use crate::domain::entities::CurrentUser;
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// Service computing click analytics for the authenticated user.
///
/// Read-only: it never writes to the data store. Independent reads are issued
/// concurrently and any failure fails the whole call.
pub struct AnalyticsService<R: AnalyticsRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: AnalyticsRepository + ?Sized> AnalyticsService<R> {
    /// Creates a new analytics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Builds the analytics report for `user` over `window`, anchored at the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if any of the underlying reads fail.
    pub async fn get_report(
        &self,
        user: &CurrentUser,
        window: AnalyticsWindow,
    ) -> Result<AnalyticsReport, AppError> {
        self.get_report_at(user, window, Utc::now()).await
    }

    /// Same as [`Self::get_report`] with an explicit anchor instant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if any of the underlying reads fail.
    pub async fn get_report_at(
        &self,
        user: &CurrentUser,
        window: AnalyticsWindow,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsReport, AppError> {
        let since = window.start_date(now);

        let (shortlinks, link_lists, events) = tokio::try_join!(
            self.repository.list_shortlinks(user.user_id),
            self.repository.list_link_lists_with_items(user.user_id),
            self.repository.list_click_events(user.user_id, since),
        )?;

        tracing::debug!(
            user_id = user.user_id,
            days = window.days(),
            shortlinks = shortlinks.len(),
            link_lists = link_lists.len(),
            events = events.len(),
            "Building analytics report"
        );

        Ok(build_report(&shortlinks, &link_lists, &events))
    }

    /// All-time counters for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if any of the underlying reads fail.
    pub async fn get_overview(&self, user: &CurrentUser) -> Result<Overview, AppError> {
        let (shortlinks, link_lists) = tokio::try_join!(
            self.repository.list_shortlinks(user.user_id),
            self.repository.list_link_lists_with_items(user.user_id),
        )?;

        Ok(summarize(&shortlinks, &link_lists))
    }
}

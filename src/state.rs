//! Shared application state passed to every handler.

use std::sync::Arc;

use crate::application::services::{AnalyticsService, AuthService, UserService};
use crate::domain::repositories::{AnalyticsRepository, SessionRepository, UserRepository};

/// Services shared across requests.
///
/// Services hold their repositories as trait objects so the same router can
/// run against PostgreSQL in production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: Arc<AnalyticsService<dyn AnalyticsRepository>>,
    pub auth_service: Arc<AuthService<dyn SessionRepository, dyn UserRepository>>,
    pub user_service: Arc<UserService<dyn UserRepository>>,
    /// Adds the `Secure` attribute to session cookies.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        analytics_service: Arc<AnalyticsService<dyn AnalyticsRepository>>,
        auth_service: Arc<AuthService<dyn SessionRepository, dyn UserRepository>>,
        user_service: Arc<UserService<dyn UserRepository>>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            analytics_service,
            auth_service,
            user_service,
            cookie_secure,
        }
    }
}

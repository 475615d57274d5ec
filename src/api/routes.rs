//! API route configuration.
//!
//! Public routes (`/auth/register`, `/auth/login`) are rate limited per client
//! IP; protected routes require a session via
//! [`crate::api::middleware::session`].

use crate::api::handlers::{
    analytics_handler, dashboard_handler, login_handler, logout_handler, register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Registration route, without rate limiting.
pub fn register_routes() -> Router<AppState> {
    Router::new().route("/auth/register", post(register_handler))
}

/// Login route, without rate limiting.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login_handler))
}

/// Routes that require an authenticated session.
///
/// # Endpoints
///
/// - `POST /auth/logout` - End the current session
/// - `GET  /dashboard`   - All-time counters for the landing view
/// - `GET  /analytics`   - Click analytics report (`?days=N`, default 30)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/analytics", get(analytics_handler))
}

//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`              - Health check (public)
//! - `POST /api/auth/register`   - Create an account (public, rate limited)
//! - `POST /api/auth/login`      - Open a session (public, rate limited)
//! - `POST /api/auth/logout`     - End the session (session required)
//! - `GET  /api/dashboard`       - Dashboard counters (session required)
//! - `GET  /api/analytics`       - Analytics report (session required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on registration and login
//! - **Authentication** - Session cookie or Bearer token
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, session, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// The server must be started with `into_make_service_with_connect_info` so
/// the rate limiter can see the peer address.
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public_api = if behind_proxy {
        api::routes::register_routes()
            .layer(rate_limit::register_layer(SmartIpKeyExtractor))
            .merge(api::routes::login_routes().layer(rate_limit::login_layer(SmartIpKeyExtractor)))
    } else {
        api::routes::register_routes()
            .layer(rate_limit::register_layer(PeerIpKeyExtractor))
            .merge(api::routes::login_routes().layer(rate_limit::login_layer(PeerIpKeyExtractor)))
    };

    let api_router = public_api.merge(protected_api(&state));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Session-protected API routes with the session middleware applied.
pub fn protected_api(state: &AppState) -> Router<AppState> {
    api::routes::protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        session::layer,
    ))
}

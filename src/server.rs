//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum server
//! lifecycle.

use crate::application::services::{AnalyticsService, AuthService, UserService};
use crate::config::Config;
use crate::domain::repositories::{AnalyticsRepository, SessionRepository, UserRepository};
use crate::infrastructure::persistence::{
    PgAnalyticsRepository, PgSessionRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Repositories and services
/// - Axum HTTP server with graceful shutdown on Ctrl-C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(Arc::new(pool), &config);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the PostgreSQL pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the initial connection cannot be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Wires PostgreSQL repositories into the services held by [`AppState`].
pub fn build_state(pool: Arc<PgPool>, config: &Config) -> AppState {
    let analytics_repository: Arc<dyn AnalyticsRepository> =
        Arc::new(PgAnalyticsRepository::new(pool.clone()));
    let user_repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let session_repository: Arc<dyn SessionRepository> =
        Arc::new(PgSessionRepository::new(pool));

    let analytics_service = Arc::new(AnalyticsService::new(analytics_repository));
    let auth_service = Arc::new(AuthService::new(
        session_repository,
        user_repository.clone(),
        config.session_signing_secret.clone(),
        config.session_ttl(),
    ));
    let user_service = Arc::new(UserService::new(user_repository));

    AppState::new(
        analytics_service,
        auth_service,
        user_service,
        config.cookie_secure,
    )
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

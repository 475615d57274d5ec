//! PostgreSQL implementation of session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ActiveSession, NewSession, Session};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for login sessions.
///
/// Stores HMAC-SHA256 hashes of session tokens. Raw tokens are never persisted.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    user_id: i64,
    token_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ActiveSessionRow {
    session_id: i64,
    user_id: i64,
    username: String,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, created_at, expires_at
            "#,
        )
        .bind(new_session.user_id)
        .bind(&new_session.token_hash)
        .bind(new_session.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Session {
            id: row.id,
            user_id: row.user_id,
            token_hash: row.token_hash,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveSession>, AppError> {
        let row = sqlx::query_as::<_, ActiveSessionRow>(
            r#"
            SELECT s.id AS session_id, s.user_id, u.username, s.expires_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1
              AND s.expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| ActiveSession {
            session_id: r.session_id,
            user_id: r.user_id,
            username: r.username,
            expires_at: r.expires_at,
        }))
    }

    async fn touch(&self, session_id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE sessions SET last_seen_at = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn delete(&self, session_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}

//! Login sessions and the authenticated identity they resolve to.

use chrono::{DateTime, Utc};

/// A stored session row.
///
/// Only the HMAC of the opaque session token is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns true once `now` has reached the expiry time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Input data for creating a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

/// A non-expired session joined with its owner.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub session_id: i64,
    pub user_id: i64,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// The verified identity of the caller.
///
/// Produced by the session middleware and handed explicitly to services;
/// handlers receive it as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub session_id: i64,
}

impl From<ActiveSession> for CurrentUser {
    fn from(session: ActiveSession) -> Self {
        Self {
            user_id: session.user_id,
            username: session.username,
            session_id: session.session_id,
        }
    }
}

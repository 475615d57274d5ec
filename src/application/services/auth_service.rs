//! Session authentication service.

use chrono::{DateTime, TimeDelta, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::{Arc, LazyLock};

use crate::domain::entities::{CurrentUser, NewSession, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session_token::generate_session_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const DUMMY_PASSWORD: &str = "linkhub-unknown-login";

/// Verified against when the login matches no user, so unknown logins cost
/// the same Argon2 work as wrong passwords.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password(DUMMY_PASSWORD).ok());

/// A freshly created session. `token` is shown to the client exactly once.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Service resolving session tokens to users and issuing new sessions.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and lookup. An attacker with read-only access to the database cannot turn a
/// stored hash back into a usable token.
pub struct AuthService<S, U>
where
    S: SessionRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    sessions: Arc<S>,
    users: Arc<U>,
    signing_secret: String,
    session_ttl: TimeDelta,
}

impl<S, U> AuthService<S, U>
where
    S: SessionRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `sessions` - session repository
    /// - `users` - user repository used for login lookups
    /// - `signing_secret` - HMAC key; rotating it invalidates every session
    /// - `session_ttl` - lifetime of newly issued sessions
    pub fn new(
        sessions: Arc<S>,
        users: Arc<U>,
        signing_secret: String,
        session_ttl: TimeDelta,
    ) -> Self {
        Self {
            sessions,
            users,
            signing_secret,
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> TimeDelta {
        self.session_ttl
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Resolves a raw session token to the user it belongs to.
    ///
    /// On success the session's `last_seen_at` is refreshed; a failure to do so
    /// does not fail authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or expired.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let token_hash = self.hash_token(token);

        let session = self
            .sessions
            .find_active(&token_hash, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Invalid or expired session"}),
                )
            })?;

        if let Err(e) = self.sessions.touch(session.session_id).await {
            tracing::debug!(session_id = session.session_id, error = %e, "Failed to touch session");
        }

        Ok(session.into())
    }

    /// Verifies credentials and opens a new session.
    ///
    /// `login` may be a username or an email address.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user does not exist or the
    /// password is wrong (the two cases are indistinguishable to the caller).
    /// Returns [`AppError::Internal`] on database or hashing errors.
    pub async fn login(&self, login: &str, password: &str) -> Result<IssuedSession, AppError> {
        let invalid = || AppError::unauthorized("Invalid credentials", json!({}));

        let user = self.users.find_by_login(login).await?;

        let password = password.to_owned();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => verify_password(&password, &hash),
            None => {
                if let Some(dummy) = DUMMY_HASH.as_deref() {
                    let _ = verify_password(&password, dummy);
                }
                Ok(false)
            }
        })
        .await
        .map_err(|e| AppError::internal_from("Password verification task failed", e))?
        .map_err(|e| AppError::internal_from("Stored password hash is invalid", e))?;

        let Some(user) = user else {
            tracing::info!(target: "security", event = "LOGIN_FAILED", login = %login);
            return Err(invalid());
        };

        if !matches {
            tracing::info!(target: "security", event = "LOGIN_FAILED", user_id = user.id);
            return Err(invalid());
        }

        let token = generate_session_token()
            .map_err(|e| AppError::internal_from("Failed to generate session token", e))?;
        let expires_at = Utc::now() + self.session_ttl;

        self.sessions
            .create(NewSession {
                user_id: user.id,
                token_hash: self.hash_token(&token),
                expires_at,
            })
            .await?;

        tracing::info!(target: "security", event = "LOGIN", user_id = user.id);

        Ok(IssuedSession {
            token,
            expires_at,
            user,
        })
    }

    /// Ends the caller's current session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, user: &CurrentUser) -> Result<(), AppError> {
        self.sessions.delete(user.session_id).await?;
        tracing::info!(target: "security", event = "LOGOUT", user_id = user.user_id);
        Ok(())
    }
}

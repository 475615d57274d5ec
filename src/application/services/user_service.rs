//! User registration and account lookup service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::hash_password;
use crate::utils::sanitize::{sanitize_email, sanitize_input};

/// Registration input, already validated for shape and length.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Service for creating and looking up user accounts.
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a new user.
    ///
    /// Username and email are sanitized, the email is lower-cased, and the
    /// password is hashed with Argon2id off the async executor.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with `Email already registered` or
    /// `Username already taken` when either is in use.
    /// Returns [`AppError::Internal`] on database or hashing errors.
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let username = sanitize_input(&registration.username);
        let email = sanitize_email(&registration.email);

        if let Some(existing) = self
            .repository
            .find_by_email_or_username(&email, &username)
            .await?
        {
            let message = if existing.email == email {
                "Email already registered"
            } else {
                "Username already taken"
            };
            return Err(AppError::conflict(message, json!({})));
        }

        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::internal_from("Password hashing task failed", e))?
            .map_err(|e| AppError::internal_from("Failed to hash password", e))?;

        let user = self
            .repository
            .create(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        tracing::info!(
            target: "security",
            event = "USER_REGISTERED",
            user_id = user.id,
            username = %user.username
        );

        Ok(user)
    }

    /// Looks a user up by username or email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_by_login(&self, login: &str) -> Result<User, AppError> {
        self.repository
            .find_by_login(login)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "login": login })))
    }

    /// Lists users, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        self.repository.list(limit, offset).await
    }

    /// Counts registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

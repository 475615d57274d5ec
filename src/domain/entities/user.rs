//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `password_hash` holds an Argon2id PHC string and never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        username: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }
}

/// Input data for creating a new user.
///
/// Fields are expected to be sanitized and the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let now = Utc::now();
        let user = User::new(
            7,
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$argon2id$v=19$stub".to_string(),
            now,
        );

        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.created_at, now);
    }
}

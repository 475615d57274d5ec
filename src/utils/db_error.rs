//! Helpers for interpreting database constraint violations.

/// Unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Unique constraint on `users.username`.
pub const USERS_USERNAME_KEY: &str = "users_username_key";

/// Returns the name of the violated unique constraint, if `e` is one.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<&str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    db_err.constraint()
}

/// Maps a unique violation on the `users` table to a user-facing message.
pub fn user_conflict_message(e: &sqlx::Error) -> Option<&'static str> {
    match unique_violation_constraint(e)? {
        USERS_EMAIL_KEY => Some("Email already registered"),
        USERS_USERNAME_KEY => Some("Username already taken"),
        _ => None,
    }
}

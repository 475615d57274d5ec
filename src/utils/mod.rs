//! Helper functions shared across layers.
//!
//! - [`password`] - Argon2id password hashing
//! - [`session_token`] - Random session token generation
//! - [`sanitize`] - Registration input clean-up
//! - [`db_error`] - Classification of database constraint errors

pub mod db_error;
pub mod password;
pub mod sanitize;
pub mod session_token;

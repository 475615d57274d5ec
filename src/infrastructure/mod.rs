//! Infrastructure layer: PostgreSQL implementations of the repository traits.

pub mod persistence;

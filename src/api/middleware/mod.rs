//! HTTP middleware for request processing and protection.
//!
//! Provides session authentication, rate limiting, and request tracing.

pub mod rate_limit;
pub mod session;
pub mod tracing;

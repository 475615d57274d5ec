//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and formats responses
//! according to the JSON API contract.
//!
//! # Modules
//!
//! - [`dto`] - Request/response serialization and validation
//! - [`extract`] - Body extractors with JSON error rejections
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Session authentication, rate limiting, tracing
//! - [`routes`] - Route composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

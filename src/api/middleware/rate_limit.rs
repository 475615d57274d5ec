//! Rate limiting middleware using token bucket algorithm.
//!
//! Limits are keyed by client IP. Pass [`PeerIpKeyExtractor`] for direct
//! deployments and [`SmartIpKeyExtractor`] when running behind a trusted
//! reverse proxy that sets `X-Forwarded-For` / `X-Real-IP`.
//!
//! Throttled requests get a `429` in the usual JSON error shape, with the
//! governor's `retry-after` headers, and a `RATE_LIMIT_EXCEEDED` security log.
//!
//! [`PeerIpKeyExtractor`]: tower_governor::key_extractor::PeerIpKeyExtractor
//! [`SmartIpKeyExtractor`]: tower_governor::key_extractor::SmartIpKeyExtractor

use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use serde_json::json;
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

use crate::error::AppError;

type IpGovernorLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates the rate limiter for account registration.
///
/// # Limits
///
/// - **Burst**: 5 requests
/// - **Replenish**: one request every 720 seconds (about 5 per hour)
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn register_layer<K: KeyExtractor>(key_extractor: K) -> IpGovernorLayer<K> {
    build(key_extractor, "register", 720, 5)
}

/// Creates the rate limiter for login attempts.
///
/// # Limits
///
/// - **Burst**: 10 requests
/// - **Replenish**: one request every 6 seconds
pub fn login_layer<K: KeyExtractor>(key_extractor: K) -> IpGovernorLayer<K> {
    build(key_extractor, "login", 6, 10)
}

fn build<K: KeyExtractor>(
    key_extractor: K,
    scope: &'static str,
    period_secs: u64,
    burst: u32,
) -> IpGovernorLayer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(period_secs)
            .burst_size(burst)
            .finish()
            .expect("rate limit period and burst are non-zero"),
    );

    GovernorLayer::new(governor_conf).error_handler(move |error| rejection(scope, error))
}

fn rejection(scope: &'static str, error: GovernorError) -> Response {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::info!(
                target: "security",
                event = "RATE_LIMIT_EXCEEDED",
                scope,
                wait_secs = wait_time
            );

            let mut response = AppError::rate_limited(
                "Too many requests, please try again later",
                json!({ "retryAfterSecs": wait_time }),
            )
            .into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        other => Response::from(other),
    }
}

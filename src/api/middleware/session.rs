//! Session authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Authenticates requests and attaches the caller as a
/// [`CurrentUser`](crate::domain::entities::CurrentUser) extension.
///
/// The token is read from the `session_token` cookie, falling back to
/// `Authorization: Bearer <token>` for non-browser clients.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if no token is
/// present or the session is unknown or expired. Handlers behind this layer
/// never run for unauthenticated requests.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/analytics", get(analytics_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = match session_cookie(&parts.headers) {
        Some(token) => token,
        None => {
            let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
                .await
                .map_err(|_| {
                    AppError::unauthorized(
                        "Unauthorized",
                        json!({ "reason": "Session cookie or Authorization header is missing" }),
                    )
                })?;
            token
        }
    };

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Extracts a non-empty `session_token` value from the `Cookie` header.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_token=abc123; lang=en"),
        );

        assert_eq!(session_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookie_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("session_token="));
        assert_eq!(session_cookie(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("other_session_token=x"));
        assert_eq!(session_cookie(&headers), None);
    }
}

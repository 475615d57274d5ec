//! Handlers for registration, login and logout.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use chrono::TimeDelta;
use validator::Validate;

use crate::api::dto::auth::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserDto,
};
use crate::api::extract::ApiJson;
use crate::api::middleware::session::SESSION_COOKIE;
use crate::application::services::Registration;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a new user account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "correct-horse" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "message": "User registered successfully",
///   "user": { "id": 1, "username": "alice", "email": "alice@example.com",
///             "createdAt": "2024-03-01T10:00:00Z" }
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request - malformed body or payload fails validation
/// - 409 Conflict - email or username already in use
/// - 429 Too Many Requests - rate limit exceeded
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user: user.into(),
        }),
    ))
}

/// Opens a session for a username or email plus password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// On success the token is returned in the body and set as an `HttpOnly`
/// `session_token` cookie.
///
/// # Errors
///
/// - 400 Bad Request - malformed body, empty login or password
/// - 401 Unauthorized - unknown login or wrong password
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let issued = state
        .auth_service
        .login(&payload.login, &payload.password)
        .await?;

    let cookie = session_cookie(
        &issued.token,
        state.auth_service.session_ttl(),
        state.cookie_secure,
    )?;

    let body = LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: UserDto::from(issued.user),
    };

    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// Ends the current session and clears the cookie.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
///
/// Responds `204 No Content`.
pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Response, AppError> {
    state.auth_service.logout(&user).await?;

    let cookie = session_cookie("", TimeDelta::zero(), state.cookie_secure)?;

    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]).into_response())
}

/// Builds the `Set-Cookie` value for the session cookie.
///
/// A zero `max_age` with an empty token clears the cookie.
fn session_cookie(token: &str, max_age: TimeDelta, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        max_age.num_seconds()
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::internal_from("Invalid session cookie value", e))
}

//! Handler for the dashboard summary endpoint.

use axum::{Extension, Json, extract::State};

use crate::api::dto::dashboard::DashboardResponse;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns all-time counters for the authenticated user.
///
/// # Endpoint
///
/// `GET /api/dashboard`
///
/// # Response
///
/// ```json
/// {
///   "username": "alice",
///   "stats": { "totalShortlinks": 2, "activeShortlinks": 1, "totalLinklists": 1,
///              "totalListItems": 3, "totalClicks": 18 }
/// }
/// ```
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DashboardResponse>, AppError> {
    let overview = state.analytics_service.get_overview(&user).await?;

    Ok(Json(DashboardResponse {
        username: user.username,
        stats: overview.into(),
    }))
}

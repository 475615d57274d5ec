//! Handler for the analytics report endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::analytics::{AnalyticsParams, AnalyticsResponse};
use crate::domain::analytics::AnalyticsWindow;
use crate::domain::entities::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click analytics for the authenticated user.
///
/// # Endpoint
///
/// `GET /api/analytics?days=7`
///
/// # Query Parameters
///
/// - `days` (optional) - trailing window in days, default 30. Values that do
///   not start with digits fall back to the default. When repeated, the
///   first value is used.
///
/// # Response
///
/// ```json
/// {
///   "overview": { "totalShortlinks": 2, "activeShortlinks": 1, "totalShortlinkClicks": 15,
///                 "totalLinklists": 1, "totalListItems": 1, "totalListClicks": 3,
///                 "totalClicks": 18 },
///   "clicksOverTime": [{ "date": "2024-03-01", "clicks": 2 }],
///   "topShortlinks": [{ "id": 1, "name": "promo", "clicks": 10 }],
///   "topListItems": [{ "id": 7, "title": "Blog", "clicks": 3, "listTitle": "My links" }],
///   "recentClicks": [{ "date": "2024-03-01T10:00:00Z", "type": "shortlink" }]
/// }
/// ```
///
/// # Errors
///
/// - 401 Unauthorized - no valid session (rejected by middleware)
/// - 500 Internal Server Error - any data store read failed
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let params = AnalyticsParams::from_pairs(pairs);
    let window = AnalyticsWindow::from_param(params.days.as_deref());

    let report = state.analytics_service.get_report(&user, window).await?;

    Ok(Json(report.into()))
}

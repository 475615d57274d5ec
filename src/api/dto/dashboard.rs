//! DTOs for the dashboard summary endpoint.

use serde::Serialize;

use crate::domain::analytics::Overview;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
    pub stats: DashboardStats,
}

/// All-time counters shown on the dashboard landing view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_shortlinks: i64,
    pub active_shortlinks: i64,
    pub total_linklists: i64,
    pub total_list_items: i64,
    pub total_clicks: i64,
}

impl From<Overview> for DashboardStats {
    fn from(o: Overview) -> Self {
        Self {
            total_shortlinks: o.total_shortlinks,
            active_shortlinks: o.active_shortlinks,
            total_linklists: o.total_linklists,
            total_list_items: o.total_list_items,
            total_clicks: o.total_clicks,
        }
    }
}

//! DTOs for the analytics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::analytics::{
    AnalyticsReport, DailyClicks, Overview, RecentClick, TopListItem, TopShortlink,
};
use crate::domain::entities::ClickKind;

/// Query parameters for `GET /api/analytics`.
///
/// `days` is kept as a raw string: anything that does not start with digits
/// falls back to the default window instead of failing the request.
#[derive(Debug, Default)]
pub struct AnalyticsParams {
    pub days: Option<String>,
}

impl AnalyticsParams {
    /// Builds the params from decoded query pairs. The first `days` wins and
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let days = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "days").then_some(value));

        Self { days }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub overview: OverviewDto,
    pub clicks_over_time: Vec<DailyClicksDto>,
    pub top_shortlinks: Vec<TopShortlinkDto>,
    pub top_list_items: Vec<TopListItemDto>,
    pub recent_clicks: Vec<RecentClickDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub total_shortlinks: i64,
    pub active_shortlinks: i64,
    pub total_shortlink_clicks: i64,
    pub total_linklists: i64,
    pub total_list_items: i64,
    pub total_list_clicks: i64,
    pub total_clicks: i64,
}

/// Clicks on one UTC calendar day, `date` formatted as `YYYY-MM-DD`.
#[derive(Debug, Serialize)]
pub struct DailyClicksDto {
    pub date: String,
    pub clicks: i64,
}

#[derive(Debug, Serialize)]
pub struct TopShortlinkDto {
    pub id: i64,
    pub name: String,
    pub clicks: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopListItemDto {
    pub id: i64,
    pub title: String,
    pub clicks: i64,
    pub list_title: String,
}

#[derive(Debug, Serialize)]
pub struct RecentClickDto {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ClickKind,
}

impl From<Overview> for OverviewDto {
    fn from(o: Overview) -> Self {
        Self {
            total_shortlinks: o.total_shortlinks,
            active_shortlinks: o.active_shortlinks,
            total_shortlink_clicks: o.total_shortlink_clicks,
            total_linklists: o.total_linklists,
            total_list_items: o.total_list_items,
            total_list_clicks: o.total_list_clicks,
            total_clicks: o.total_clicks,
        }
    }
}

impl From<DailyClicks> for DailyClicksDto {
    fn from(d: DailyClicks) -> Self {
        Self {
            date: d.date.format("%Y-%m-%d").to_string(),
            clicks: d.clicks,
        }
    }
}

impl From<TopShortlink> for TopShortlinkDto {
    fn from(t: TopShortlink) -> Self {
        Self {
            id: t.id,
            name: t.name,
            clicks: t.clicks,
        }
    }
}

impl From<TopListItem> for TopListItemDto {
    fn from(t: TopListItem) -> Self {
        Self {
            id: t.id,
            title: t.title,
            clicks: t.clicks,
            list_title: t.list_title,
        }
    }
}

impl From<RecentClick> for RecentClickDto {
    fn from(r: RecentClick) -> Self {
        Self {
            date: r.clicked_at,
            kind: r.kind,
        }
    }
}

impl From<AnalyticsReport> for AnalyticsResponse {
    fn from(report: AnalyticsReport) -> Self {
        Self {
            overview: report.overview.into(),
            clicks_over_time: report.clicks_over_time.into_iter().map(Into::into).collect(),
            top_shortlinks: report.top_shortlinks.into_iter().map(Into::into).collect(),
            top_list_items: report.top_list_items.into_iter().map(Into::into).collect(),
            recent_clicks: report.recent_clicks.into_iter().map(Into::into).collect(),
        }
    }
}

//! Click analytics aggregation.
//!
//! Everything here is pure: the service layer fetches a user's shortlinks,
//! link lists and windowed click events, and [`build_report`] turns them into
//! an [`AnalyticsReport`]. Totals come from the stored click counters; the time
//! series and recency preview come from raw click events. The two sources are
//! not reconciled.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use crate::domain::entities::{ClickEvent, ClickKind, LinkList, ShortlinkSummary};

/// Window used when the caller does not supply a usable one.
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

/// Length of the top shortlink / top list item rankings.
pub const TOP_LIMIT: usize = 5;

/// Length of the recent clicks preview.
pub const RECENT_LIMIT: usize = 10;

/// Trailing number of days of click history to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsWindow {
    days: u64,
}

impl Default for AnalyticsWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}

impl AnalyticsWindow {
    pub fn new(days: u64) -> Self {
        Self { days }
    }

    /// Builds a window from a raw `days` query value.
    ///
    /// Accepts a leading run of ASCII digits (optionally after whitespace or a
    /// `+`) and ignores anything after it. Missing, negative or non-numeric
    /// input falls back to [`DEFAULT_WINDOW_DAYS`]. Digit runs too large for
    /// `u64` saturate.
    pub fn from_param(raw: Option<&str>) -> Self {
        raw.and_then(parse_leading_days)
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn days(&self) -> u64 {
        self.days
    }

    /// Inclusive lower bound of the window, anchored at `now`.
    ///
    /// Never earlier than the Unix epoch, which makes oversized windows
    /// cover the whole history.
    pub fn start_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        i64::try_from(self.days)
            .ok()
            .and_then(TimeDelta::try_days)
            .and_then(|delta| now.checked_sub_signed(delta))
            .map(|start| start.max(DateTime::UNIX_EPOCH))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

fn parse_leading_days(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if digits.is_empty() {
        return None;
    }

    // All-digit input only fails to parse on overflow.
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Headline counters across all of a user's links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overview {
    pub total_shortlinks: i64,
    pub active_shortlinks: i64,
    pub total_shortlink_clicks: i64,
    pub total_linklists: i64,
    pub total_list_items: i64,
    pub total_list_clicks: i64,
    pub total_clicks: i64,
}

/// Number of clicks recorded on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyClicks {
    pub date: NaiveDate,
    pub clicks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopShortlink {
    pub id: i64,
    pub name: String,
    pub clicks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopListItem {
    pub id: i64,
    pub title: String,
    pub clicks: i64,
    pub list_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentClick {
    pub clicked_at: DateTime<Utc>,
    pub kind: ClickKind,
}

/// Complete analytics report for one user and window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub overview: Overview,
    pub clicks_over_time: Vec<DailyClicks>,
    pub top_shortlinks: Vec<TopShortlink>,
    pub top_list_items: Vec<TopListItem>,
    pub recent_clicks: Vec<RecentClick>,
}

/// Computes the overview counters from stored click counters.
pub fn summarize(shortlinks: &[ShortlinkSummary], link_lists: &[LinkList]) -> Overview {
    let total_shortlink_clicks: i64 = shortlinks.iter().map(|link| link.clicks).sum();
    let total_list_clicks: i64 = link_lists.iter().map(LinkList::total_clicks).sum();

    Overview {
        total_shortlinks: shortlinks.len() as i64,
        active_shortlinks: shortlinks.iter().filter(|link| link.is_active).count() as i64,
        total_shortlink_clicks,
        total_linklists: link_lists.len() as i64,
        total_list_items: link_lists.iter().map(|list| list.items.len() as i64).sum(),
        total_list_clicks,
        total_clicks: total_shortlink_clicks + total_list_clicks,
    }
}

/// Buckets events by UTC date, ascending. Days without clicks are omitted.
pub fn clicks_over_time(events: &[ClickEvent]) -> Vec<DailyClicks> {
    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for event in events {
        *by_date.entry(event.clicked_at.date_naive()).or_insert(0) += 1;
    }

    by_date
        .into_iter()
        .map(|(date, clicks)| DailyClicks { date, clicks })
        .collect()
}

/// Highest-clicked shortlinks, ties kept in input order.
pub fn top_shortlinks(shortlinks: &[ShortlinkSummary], limit: usize) -> Vec<TopShortlink> {
    let mut ranked: Vec<&ShortlinkSummary> = shortlinks.iter().collect();
    ranked.sort_by(|a, b| b.clicks.cmp(&a.clicks));

    ranked
        .into_iter()
        .take(limit)
        .map(|link| TopShortlink {
            id: link.id,
            name: link.display_name().to_string(),
            clicks: link.clicks,
        })
        .collect()
}

/// Highest-clicked items across every list, tagged with their list title.
pub fn top_list_items(link_lists: &[LinkList], limit: usize) -> Vec<TopListItem> {
    let mut ranked: Vec<TopListItem> = link_lists
        .iter()
        .flat_map(|list| {
            list.items.iter().map(move |item| TopListItem {
                id: item.id,
                title: item.title.clone(),
                clicks: item.clicks,
                list_title: list.title.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    ranked.truncate(limit);
    ranked
}

/// First `limit` events of a newest-first event list.
pub fn recent_clicks(events: &[ClickEvent], limit: usize) -> Vec<RecentClick> {
    events
        .iter()
        .take(limit)
        .map(|event| RecentClick {
            clicked_at: event.clicked_at,
            kind: event.kind(),
        })
        .collect()
}

/// Assembles the full report.
///
/// `events` must already be restricted to the window and ordered by
/// `clicked_at` descending, as returned by
/// [`crate::domain::repositories::AnalyticsRepository::list_click_events`].
pub fn build_report(
    shortlinks: &[ShortlinkSummary],
    link_lists: &[LinkList],
    events: &[ClickEvent],
) -> AnalyticsReport {
    AnalyticsReport {
        overview: summarize(shortlinks, link_lists),
        clicks_over_time: clicks_over_time(events),
        top_shortlinks: top_shortlinks(shortlinks, TOP_LIMIT),
        top_list_items: top_list_items(link_lists, TOP_LIMIT),
        recent_clicks: recent_clicks(events, RECENT_LIMIT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LinkListItem;
    use chrono::TimeZone;

    fn shortlink(id: i64, code: &str, alias: Option<&str>, clicks: i64) -> ShortlinkSummary {
        ShortlinkSummary {
            id,
            short_code: code.to_string(),
            custom_alias: alias.map(str::to_string),
            clicks,
            is_active: true,
        }
    }

    fn item(id: i64, title: &str, clicks: i64) -> LinkListItem {
        LinkListItem {
            id,
            title: title.to_string(),
            clicks,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn click(clicked_at: DateTime<Utc>, shortlink_id: Option<i64>) -> ClickEvent {
        ClickEvent {
            clicked_at,
            shortlink_id,
            list_item_id: if shortlink_id.is_some() { None } else { Some(1) },
        }
    }

    #[test]
    fn test_window_defaults_to_thirty_days() {
        assert_eq!(AnalyticsWindow::from_param(None).days(), 30);
        assert_eq!(AnalyticsWindow::default().days(), 30);
    }

    #[test]
    fn test_window_parses_leading_integer() {
        assert_eq!(AnalyticsWindow::from_param(Some("7")).days(), 7);
        assert_eq!(AnalyticsWindow::from_param(Some(" 14")).days(), 14);
        assert_eq!(AnalyticsWindow::from_param(Some("+3")).days(), 3);
        assert_eq!(AnalyticsWindow::from_param(Some("90days")).days(), 90);
        assert_eq!(AnalyticsWindow::from_param(Some("0")).days(), 0);
    }

    #[test]
    fn test_window_unparseable_falls_back() {
        assert_eq!(AnalyticsWindow::from_param(Some("")).days(), 30);
        assert_eq!(AnalyticsWindow::from_param(Some("abc")).days(), 30);
        assert_eq!(AnalyticsWindow::from_param(Some("-5")).days(), 30);
    }

    #[test]
    fn test_window_huge_values_saturate() {
        let window = AnalyticsWindow::from_param(Some("99999999999999999999999"));
        assert_eq!(window.days(), u64::MAX);
        assert_eq!(window.start_date(Utc::now()), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn test_window_start_date() {
        let now = at(2026, 3, 31, 12);
        assert_eq!(AnalyticsWindow::new(30).start_date(now), at(2026, 3, 1, 12));
        assert_eq!(AnalyticsWindow::new(0).start_date(now), now);
    }

    #[test]
    fn test_window_start_date_clamps_to_epoch() {
        let now = at(2026, 3, 31, 12);
        assert_eq!(
            AnalyticsWindow::new(10_000_000).start_date(now),
            DateTime::UNIX_EPOCH
        );
    }

    #[test]
    fn test_empty_user_report() {
        let report = build_report(&[], &[], &[]);

        assert_eq!(report.overview, Overview::default());
        assert_eq!(report.overview.total_clicks, 0);
        assert!(report.clicks_over_time.is_empty());
        assert!(report.top_shortlinks.is_empty());
        assert!(report.top_list_items.is_empty());
        assert!(report.recent_clicks.is_empty());
    }

    #[test]
    fn test_two_links_and_one_item_scenario() {
        let shortlinks = vec![
            shortlink(1, "link10", None, 10),
            shortlink(2, "link5", None, 5),
        ];
        let lists = vec![LinkList {
            id: 1,
            title: "My list".to_string(),
            items: vec![item(1, "item3", 3)],
        }];

        let report = build_report(&shortlinks, &lists, &[]);

        assert_eq!(report.overview.total_shortlink_clicks, 15);
        assert_eq!(report.overview.total_list_clicks, 3);
        assert_eq!(report.overview.total_clicks, 18);
        assert_eq!(
            report
                .top_shortlinks
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>(),
            vec!["link10", "link5"]
        );
        assert_eq!(report.top_list_items.len(), 1);
        assert_eq!(report.top_list_items[0].title, "item3");
        assert_eq!(report.top_list_items[0].list_title, "My list");
    }

    #[test]
    fn test_overview_counts() {
        let mut inactive = shortlink(3, "off", None, 2);
        inactive.is_active = false;
        let shortlinks = vec![shortlink(1, "a", None, 4), inactive];
        let lists = vec![
            LinkList {
                id: 1,
                title: "One".to_string(),
                items: vec![item(1, "x", 1), item(2, "y", 2)],
            },
            LinkList {
                id: 2,
                title: "Two".to_string(),
                items: vec![],
            },
        ];

        let overview = summarize(&shortlinks, &lists);

        assert_eq!(overview.total_shortlinks, 2);
        assert_eq!(overview.active_shortlinks, 1);
        assert_eq!(overview.total_shortlink_clicks, 6);
        assert_eq!(overview.total_linklists, 2);
        assert_eq!(overview.total_list_items, 2);
        assert_eq!(overview.total_list_clicks, 3);
        assert_eq!(
            overview.total_clicks,
            overview.total_shortlink_clicks + overview.total_list_clicks
        );
    }

    #[test]
    fn test_clicks_over_time_is_sparse_and_ascending() {
        let events = vec![
            click(at(2026, 1, 5, 23), Some(1)),
            click(at(2026, 1, 5, 1), None),
            click(at(2026, 1, 2, 8), Some(1)),
        ];

        let series = clicks_over_time(&events);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date.to_string(), "2026-01-02");
        assert_eq!(series[0].clicks, 1);
        assert_eq!(series[1].date.to_string(), "2026-01-05");
        assert_eq!(series[1].clicks, 2);
        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_top_shortlinks_limit_and_order() {
        let shortlinks: Vec<_> = (1..=8)
            .map(|i| shortlink(i, &format!("code{i}"), None, i * 3 % 7))
            .collect();

        let top = top_shortlinks(&shortlinks, TOP_LIMIT);

        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].clicks >= w[1].clicks));
    }

    #[test]
    fn test_top_shortlinks_ties_keep_fetch_order() {
        let shortlinks = vec![
            shortlink(1, "first", None, 5),
            shortlink(2, "second", None, 9),
            shortlink(3, "third", None, 5),
        ];

        let top = top_shortlinks(&shortlinks, TOP_LIMIT);
        let ids: Vec<i64> = top.iter().map(|l| l.id).collect();

        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_top_shortlinks_use_alias() {
        let shortlinks = vec![shortlink(1, "x1y2z3", Some("launch"), 1)];
        assert_eq!(top_shortlinks(&shortlinks, TOP_LIMIT)[0].name, "launch");
    }

    #[test]
    fn test_top_list_items_flatten_across_lists() {
        let lists = vec![
            LinkList {
                id: 1,
                title: "Work".to_string(),
                items: vec![item(1, "a", 1), item(2, "b", 8), item(3, "c", 2)],
            },
            LinkList {
                id: 2,
                title: "Fun".to_string(),
                items: vec![item(4, "d", 9), item(5, "e", 0), item(6, "f", 4)],
            },
        ];

        let top = top_list_items(&lists, TOP_LIMIT);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].id, 4);
        assert_eq!(top[0].list_title, "Fun");
        assert_eq!(top[1].id, 2);
        assert_eq!(top[1].list_title, "Work");
        assert!(top.windows(2).all(|w| w[0].clicks >= w[1].clicks));
    }

    #[test]
    fn test_recent_clicks_is_prefix_of_events() {
        let events: Vec<_> = (0..15)
            .map(|i| click(at(2026, 2, 20, 12) - TimeDelta::hours(i), Some(1)))
            .collect();

        let recent = recent_clicks(&events, RECENT_LIMIT);

        assert_eq!(recent.len(), 10);
        for (recent, event) in recent.iter().zip(events.iter()) {
            assert_eq!(recent.clicked_at, event.clicked_at);
        }
    }

    #[test]
    fn test_recent_clicks_tolerate_missing_references() {
        let events = vec![
            ClickEvent {
                clicked_at: at(2026, 2, 1, 0),
                shortlink_id: None,
                list_item_id: None,
            },
            ClickEvent {
                clicked_at: at(2026, 1, 31, 0),
                shortlink_id: Some(999),
                list_item_id: None,
            },
        ];

        let recent = recent_clicks(&events, RECENT_LIMIT);

        assert_eq!(recent[0].kind, ClickKind::ListItem);
        assert_eq!(recent[1].kind, ClickKind::Shortlink);
    }
}

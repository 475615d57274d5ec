//! Click event entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single recorded click.
///
/// The schema guarantees exactly one of `shortlink_id` / `list_item_id` is set,
/// but readers must not rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub clicked_at: DateTime<Utc>,
    pub shortlink_id: Option<i64>,
    pub list_item_id: Option<i64>,
}

/// What kind of entity a click was recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickKind {
    Shortlink,
    #[serde(rename = "listitem")]
    ListItem,
}

impl ClickEvent {
    /// `Shortlink` when a shortlink reference is present, `ListItem` otherwise.
    pub fn kind(&self) -> ClickKind {
        if self.shortlink_id.is_some() {
            ClickKind::Shortlink
        } else {
            ClickKind::ListItem
        }
    }
}

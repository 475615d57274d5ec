//! Link list pages and their items.

/// A user-owned curated page with its items in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkList {
    pub id: i64,
    pub title: String,
    pub items: Vec<LinkListItem>,
}

/// A single entry on a link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkListItem {
    pub id: i64,
    pub title: String,
    pub clicks: i64,
}

impl LinkList {
    /// Sum of the item click counters.
    pub fn total_clicks(&self) -> i64 {
        self.items.iter().map(|item| item.clicks).sum()
    }
}

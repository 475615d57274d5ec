//! PostgreSQL implementation of the analytics read model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, LinkList, LinkListItem, ShortlinkSummary};
use crate::domain::repositories::AnalyticsRepository;
use crate::error::AppError;

/// PostgreSQL repository for the analytics report queries.
///
/// Lists are loaded with their items using two queries merged in memory.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortlinkRow {
    id: i64,
    short_code: String,
    custom_alias: Option<String>,
    clicks: i64,
    is_active: bool,
}

impl From<ShortlinkRow> for ShortlinkSummary {
    fn from(r: ShortlinkRow) -> Self {
        Self {
            id: r.id,
            short_code: r.short_code,
            custom_alias: r.custom_alias,
            clicks: r.clicks,
            is_active: r.is_active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LinkListRow {
    id: i64,
    title: String,
}

#[derive(sqlx::FromRow)]
struct LinkListItemRow {
    id: i64,
    list_id: i64,
    title: String,
    clicks: i64,
}

#[derive(sqlx::FromRow)]
struct ClickEventRow {
    clicked_at: DateTime<Utc>,
    shortlink_id: Option<i64>,
    list_item_id: Option<i64>,
}

impl From<ClickEventRow> for ClickEvent {
    fn from(r: ClickEventRow) -> Self {
        Self {
            clicked_at: r.clicked_at,
            shortlink_id: r.shortlink_id,
            list_item_id: r.list_item_id,
        }
    }
}

/// Attaches items to their lists, preserving both orders. Orphans are dropped.
fn merge_items(lists: Vec<LinkListRow>, items: Vec<LinkListItemRow>) -> Vec<LinkList> {
    let mut merged: Vec<LinkList> = lists
        .into_iter()
        .map(|r| LinkList {
            id: r.id,
            title: r.title,
            items: Vec::new(),
        })
        .collect();

    let index: HashMap<i64, usize> = merged
        .iter()
        .enumerate()
        .map(|(pos, list)| (list.id, pos))
        .collect();

    for item in items {
        if let Some(&pos) = index.get(&item.list_id) {
            merged[pos].items.push(LinkListItem {
                id: item.id,
                title: item.title,
                clicks: item.clicks,
            });
        }
    }

    merged
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn list_shortlinks(&self, user_id: i64) -> Result<Vec<ShortlinkSummary>, AppError> {
        let rows = sqlx::query_as::<_, ShortlinkRow>(
            r#"
            SELECT id, short_code, custom_alias, clicks, is_active
            FROM shortlinks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortlinkSummary::from).collect())
    }

    async fn list_link_lists_with_items(&self, user_id: i64) -> Result<Vec<LinkList>, AppError> {
        let lists = sqlx::query_as::<_, LinkListRow>(
            r#"
            SELECT id, title
            FROM link_lists
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let items = sqlx::query_as::<_, LinkListItemRow>(
            r#"
            SELECT li.id, li.list_id, li.title, li.clicks
            FROM link_list_items li
            JOIN link_lists ll ON ll.id = li.list_id
            WHERE ll.user_id = $1
            ORDER BY li.list_id, li.position, li.id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(merge_items(lists, items))
    }

    async fn list_click_events(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError> {
        let rows = sqlx::query_as::<_, ClickEventRow>(
            r#"
            SELECT ce.clicked_at, ce.shortlink_id, ce.list_item_id
            FROM click_events ce
            LEFT JOIN shortlinks s ON s.id = ce.shortlink_id
            LEFT JOIN link_list_items li ON li.id = ce.list_item_id
            LEFT JOIN link_lists ll ON ll.id = li.list_id
            WHERE (s.user_id = $1 OR ll.user_id = $1)
              AND ce.clicked_at >= $2
            ORDER BY ce.clicked_at DESC, ce.id DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ClickEvent::from).collect())
    }
}

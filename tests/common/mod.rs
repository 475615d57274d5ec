#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::get;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use linkhub::api::handlers::health_handler;
use linkhub::api::routes::{login_routes, register_routes};
use linkhub::application::services::{AnalyticsService, AuthService, UserService};
use linkhub::domain::entities::{
    ActiveSession, ClickEvent, LinkList, LinkListItem, NewSession, NewUser, Session,
    ShortlinkSummary, User,
};
use linkhub::domain::repositories::{AnalyticsRepository, SessionRepository, UserRepository};
use linkhub::error::AppError;
use linkhub::routes::protected_api;
use linkhub::state::AppState;
use linkhub::utils::password::hash_password;
use serde_json::json;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// In-memory stand-in for PostgreSQL implementing every repository trait.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    sessions: Mutex<Vec<Session>>,
    shortlinks: Mutex<Vec<(i64, ShortlinkSummary)>>,
    link_lists: Mutex<Vec<(i64, LinkList)>>,
    /// Click events tagged with the owning user id.
    click_events: Mutex<Vec<(i64, ClickEvent)>>,
    analytics_reads: AtomicUsize,
    fail_reads: AtomicBool,
    fail_counts: AtomicBool,
}

impl InMemoryStore {
    pub fn analytics_reads(&self) -> usize {
        self.analytics_reads.load(Ordering::SeqCst)
    }

    /// Makes every analytics read fail with an internal error.
    pub fn fail_analytics_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn insert_user(&self, username: &str, email: &str, password_hash: &str) -> User {
        let mut users = self.users.lock().unwrap();
        let user = User::new(
            users.len() as i64 + 1,
            username.to_string(),
            email.to_string(),
            password_hash.to_string(),
            Utc::now(),
        );
        users.push(user.clone());
        user
    }

    pub fn add_shortlink(&self, user_id: i64, shortlink: ShortlinkSummary) {
        self.shortlinks.lock().unwrap().push((user_id, shortlink));
    }

    pub fn add_link_list(&self, user_id: i64, list: LinkList) {
        self.link_lists.lock().unwrap().push((user_id, list));
    }

    pub fn add_click(&self, user_id: i64, event: ClickEvent) {
        self.click_events.lock().unwrap().push((user_id, event));
    }

    /// Makes the user count (used by the health check) fail.
    pub fn fail_user_count(&self) {
        self.fail_counts.store(true, Ordering::SeqCst);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Moves every session's expiry into the past.
    pub fn expire_all_sessions(&self) {
        for session in self.sessions.lock().unwrap().iter_mut() {
            session.expires_at = Utc::now() - TimeDelta::seconds(1);
        }
    }

    fn record_read(&self) -> Result<(), AppError> {
        self.analytics_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::internal_from("Query failed", "simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryStore {
    async fn list_shortlinks(&self, user_id: i64) -> Result<Vec<ShortlinkSummary>, AppError> {
        self.record_read()?;
        Ok(self
            .shortlinks
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn list_link_lists_with_items(&self, user_id: i64) -> Result<Vec<LinkList>, AppError> {
        self.record_read()?;
        Ok(self
            .link_lists
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, l)| l.clone())
            .collect())
    }

    async fn list_click_events(
        &self,
        user_id: i64,
        since: DateTime<Utc>,
    ) -> Result<Vec<ClickEvent>, AppError> {
        self.record_read()?;
        let mut events: Vec<ClickEvent> = self
            .click_events
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, e)| *owner == user_id && e.clicked_at >= since)
            .map(|(_, e)| e.clone())
            .collect();
        events.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at));
        Ok(events)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let email = login.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == login || u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        if self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == new_user.email || u.username == new_user.username)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }
        Ok(self.insert_user(&new_user.username, &new_user.email, &new_user.password_hash))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(AppError::internal_from("Query failed", "connection refused"));
        }
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create(&self, new_session: NewSession) -> Result<Session, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = Session {
            id: sessions.len() as i64 + 1,
            user_id: new_session.user_id,
            token_hash: new_session.token_hash,
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ActiveSession>, AppError> {
        let session = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_expired_at(now))
            .cloned();

        let Some(session) = session else {
            return Ok(None);
        };

        let user = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == session.user_id)
            .cloned();

        Ok(user.map(|u| ActiveSession {
            session_id: session.id,
            user_id: u.id,
            username: u.username,
            expires_at: session.expires_at,
        }))
    }

    async fn touch(&self, _session_id: i64) -> Result<(), AppError> {
        Ok(())
    }

    async fn delete(&self, session_id: i64) -> Result<(), AppError> {
        self.sessions.lock().unwrap().retain(|s| s.id != session_id);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

pub fn create_test_state() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());

    let analytics_repo: Arc<dyn AnalyticsRepository> = store.clone();
    let user_repo: Arc<dyn UserRepository> = store.clone();
    let session_repo: Arc<dyn SessionRepository> = store.clone();

    let state = AppState::new(
        Arc::new(AnalyticsService::new(analytics_repo)),
        Arc::new(AuthService::new(
            session_repo,
            user_repo.clone(),
            "test-signing-secret".to_string(),
            TimeDelta::hours(1),
        )),
        Arc::new(UserService::new(user_repo)),
        false,
    );

    (state, store)
}

/// Full API router without rate limiting (axum-test has no peer address).
pub fn test_app(state: AppState) -> Router {
    let api = register_routes()
        .merge(login_routes())
        .merge(protected_api(&state));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state)
}

/// Seeds a user with [`TEST_PASSWORD`].
pub fn seed_user(store: &InMemoryStore, username: &str) -> User {
    let hash = hash_password(TEST_PASSWORD).unwrap();
    store.insert_user(username, &format!("{username}@example.com"), &hash)
}

/// Seeds a user and opens a session, returning the user and raw token.
pub async fn login_as(state: &AppState, store: &InMemoryStore, username: &str) -> (User, String) {
    let user = seed_user(store, username);
    let issued = state
        .auth_service
        .login(username, TEST_PASSWORD)
        .await
        .unwrap();
    (user, issued.token)
}

pub fn shortlink(id: i64, code: &str, alias: Option<&str>, clicks: i64) -> ShortlinkSummary {
    ShortlinkSummary {
        id,
        short_code: code.to_string(),
        custom_alias: alias.map(str::to_string),
        clicks,
        is_active: true,
    }
}

pub fn link_list(id: i64, title: &str, items: &[(i64, &str, i64)]) -> LinkList {
    LinkList {
        id,
        title: title.to_string(),
        items: items
            .iter()
            .map(|(item_id, item_title, clicks)| LinkListItem {
                id: *item_id,
                title: item_title.to_string(),
                clicks: *clicks,
            })
            .collect(),
    }
}

pub fn shortlink_click(shortlink_id: i64, at: DateTime<Utc>) -> ClickEvent {
    ClickEvent {
        clicked_at: at,
        shortlink_id: Some(shortlink_id),
        list_item_id: None,
    }
}

pub fn list_item_click(list_item_id: i64, at: DateTime<Utc>) -> ClickEvent {
    ClickEvent {
        clicked_at: at,
        shortlink_id: None,
        list_item_id: Some(list_item_id),
    }
}

pub async fn insert_db_user(pool: &sqlx::PgPool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'x') RETURNING id",
    )
    .bind(username)
    .bind(format!("{username}@example.com"))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_db_shortlink(
    pool: &sqlx::PgPool,
    user_id: i64,
    code: &str,
    alias: Option<&str>,
    clicks: i64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO shortlinks (user_id, short_code, custom_alias, original_url, clicks)
         VALUES ($1, $2, $3, 'https://example.com', $4) RETURNING id",
    )
    .bind(user_id)
    .bind(code)
    .bind(alias)
    .bind(clicks)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_db_link_list(pool: &sqlx::PgPool, user_id: i64, title: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO link_lists (user_id, title) VALUES ($1, $2) RETURNING id")
        .bind(user_id)
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_db_list_item(
    pool: &sqlx::PgPool,
    list_id: i64,
    title: &str,
    position: i32,
    clicks: i64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO link_list_items (list_id, title, url, position, clicks)
         VALUES ($1, $2, 'https://example.com', $3, $4) RETURNING id",
    )
    .bind(list_id)
    .bind(title)
    .bind(position)
    .bind(clicks)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn insert_db_click(
    pool: &sqlx::PgPool,
    shortlink_id: Option<i64>,
    list_item_id: Option<i64>,
    at: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO click_events (shortlink_id, list_item_id, clicked_at) VALUES ($1, $2, $3)",
    )
    .bind(shortlink_id)
    .bind(list_item_id)
    .bind(at)
    .execute(pool)
    .await
    .unwrap();
}

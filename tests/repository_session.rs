mod common;

use chrono::{TimeDelta, Utc};
use linkhub::domain::entities::NewSession;
use linkhub::domain::repositories::SessionRepository;
use linkhub::infrastructure::persistence::PgSessionRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_active_joins_username(pool: PgPool) {
    let user_id = common::insert_db_user(&pool, "alice").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    let session = repo
        .create(NewSession {
            user_id,
            token_hash: "hash-1".to_string(),
            expires_at: Utc::now() + TimeDelta::hours(1),
        })
        .await
        .unwrap();

    let active = repo
        .find_active("hash-1", Utc::now())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(active.session_id, session.id);
    assert_eq!(active.user_id, user_id);
    assert_eq!(active.username, "alice");

    repo.touch(session.id).await.unwrap();

    assert!(repo.find_active("unknown", Utc::now()).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_expired_sessions_are_invisible_and_purged(pool: PgPool) {
    let user_id = common::insert_db_user(&pool, "alice").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    repo.create(NewSession {
        user_id,
        token_hash: "old".to_string(),
        expires_at: Utc::now() - TimeDelta::minutes(1),
    })
    .await
    .unwrap();
    repo.create(NewSession {
        user_id,
        token_hash: "fresh".to_string(),
        expires_at: Utc::now() + TimeDelta::hours(1),
    })
    .await
    .unwrap();

    assert!(repo.find_active("old", Utc::now()).await.unwrap().is_none());

    let removed = repo.purge_expired(Utc::now()).await.unwrap();
    assert_eq!(removed, 1);
    assert!(repo.find_active("fresh", Utc::now()).await.unwrap().is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_delete_session(pool: PgPool) {
    let user_id = common::insert_db_user(&pool, "alice").await;
    let repo = PgSessionRepository::new(Arc::new(pool));

    let session = repo
        .create(NewSession {
            user_id,
            token_hash: "bye".to_string(),
            expires_at: Utc::now() + TimeDelta::hours(1),
        })
        .await
        .unwrap();

    repo.delete(session.id).await.unwrap();

    assert!(repo.find_active("bye", Utc::now()).await.unwrap().is_none());
}

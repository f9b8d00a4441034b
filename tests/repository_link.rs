mod common;

use chrono::{Duration, Utc};
use linkbio::AppError;
use linkbio::domain::activation_worker::sweep_once;
use linkbio::domain::entities::LinkRecord;
use linkbio::domain::nullable::Nullable;
use linkbio::domain::repositories::LinkRepository;
use linkbio::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn record(title: &str) -> LinkRecord {
    LinkRecord {
        title: title.to_string(),
        url: "https://example.com".to_string(),
        slug: None,
        description: None,
        icon_url: None,
        is_active: true,
        is_scheduled: false,
        scheduled_at: Nullable::Absent,
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.create(account, record("Blog")).await.unwrap();
    assert_eq!(link.title, "Blog");
    assert_eq!(link.account_id, account);
    assert_eq!(link.click_count, 0);
    assert!(link.scheduled_at.is_none());

    let found = repo.find(account, link.id).await.unwrap();
    assert_eq!(found.map(|l| l.id), Some(link.id));
}

#[sqlx::test]
async fn test_find_scoped_to_account(pool: PgPool) {
    let alice = common::create_test_account(&pool, "alice").await;
    let bob = common::create_test_account(&pool, "bob").await;
    let link = common::create_test_link(&pool, alice, "Blog").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.find(bob, link).await.unwrap().is_none());
    assert!(!repo.delete(bob, link).await.unwrap());
    assert_eq!(repo.count(alice).await.unwrap(), 1);
}

#[sqlx::test]
async fn test_list_newest_first(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(account, record("First")).await.unwrap();
    repo.create(account, record("Second")).await.unwrap();

    let links = repo.list(account).await.unwrap();
    assert_eq!(links.len(), 2);
    assert!(links[0].created_at >= links[1].created_at);
}

#[sqlx::test]
async fn test_update_absent_schedule_keeps_stored_value(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let id = common::create_scheduled_link(&pool, account, "1 day").await;
    let repo = PgLinkRepository::new(Arc::new(pool));
    let before = repo.find(account, id).await.unwrap().unwrap();

    let mut update = record("Renamed");
    update.is_active = false;
    update.is_scheduled = true;
    let after = repo.update(account, id, update).await.unwrap();

    assert_eq!(after.title, "Renamed");
    assert_eq!(after.scheduled_at, before.scheduled_at);
}

#[sqlx::test]
async fn test_update_null_schedule_clears_value(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let id = common::create_scheduled_link(&pool, account, "1 day").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let mut update = record("Unscheduled");
    update.scheduled_at = Nullable::Null;
    let after = repo.update(account, id, update).await.unwrap();

    assert!(after.scheduled_at.is_none());
    assert!(!after.is_scheduled);
}

#[sqlx::test]
async fn test_update_missing_link(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo
        .update(account, uuid::Uuid::new_v4(), record("Ghost"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[sqlx::test]
async fn test_set_active(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let id = common::create_test_link(&pool, account, "Blog").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.set_active(account, id, false).await.unwrap();
    assert!(!link.is_active);
}

#[sqlx::test]
async fn test_insert_trigger_enforces_limit(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    for i in 0..5 {
        common::create_test_link(&pool, account, &format!("Link {i}")).await;
    }
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.create(account, record("Sixth")).await;

    match result {
        Err(AppError::Forbidden { message, .. }) => {
            assert!(message.contains("link limit of 5"));
        }
        other => panic!("expected Forbidden, got {other:?}"),
    }
    assert_eq!(repo.count(account).await.unwrap(), 5);
}

#[sqlx::test]
async fn test_insert_trigger_unlimited_plan(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    common::set_tier(&pool, account, "enterprise").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    for i in 0..8 {
        repo.create(account, record(&format!("Link {i}"))).await.unwrap();
    }

    assert_eq!(repo.count(account).await.unwrap(), 8);
}

#[sqlx::test]
async fn test_insert_trigger_rejects_missing_plan(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    sqlx::query("DELETE FROM subscription_plans WHERE tier = 'free'")
        .execute(&pool)
        .await
        .unwrap();
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.create(account, record("Orphan plan")).await;

    assert!(matches!(result, Err(AppError::Internal { .. })));
    assert_eq!(repo.count(account).await.unwrap(), 0);
}

#[sqlx::test]
async fn test_duplicate_slug_conflicts(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let mut first = record("One");
    first.slug = Some("same".to_string());
    repo.create(account, first.clone()).await.unwrap();

    let result = repo.create(account, first).await;
    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_activate_due_only_past_schedules(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let due = common::create_scheduled_link(&pool, account, "-1 hour").await;
    let future = common::create_scheduled_link(&pool, account, "1 day").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    let activated = sweep_once(&repo, Utc::now()).await.unwrap();
    assert_eq!(activated, 1);

    let due = repo.find(account, due).await.unwrap().unwrap();
    assert!(due.is_active);
    assert!(!due.is_scheduled);

    let future = repo.find(account, future).await.unwrap().unwrap();
    assert!(!future.is_active);
    assert!(future.is_pending_activation());

    // Nothing left to do until the future link is due.
    assert_eq!(sweep_once(&repo, Utc::now()).await.unwrap(), 0);
    assert_eq!(
        sweep_once(&repo, Utc::now() + Duration::days(2)).await.unwrap(),
        1
    );
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}

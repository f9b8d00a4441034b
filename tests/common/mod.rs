#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use linkbio::api::handlers::health_handler;
use linkbio::api::routes::account_routes;
use linkbio::infrastructure::notify::TracingNotifier;
use linkbio::infrastructure::persistence::{
    PgAnalyticsRepository, PgLinkRepository, PgProfileRepository, PgSubscriptionRepository,
};
use linkbio::infrastructure::storage::FsAvatarStorage;
use linkbio::state::{AppState, Collaborators};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

pub const AVATAR_BASE_URL: &str = "http://localhost:3000/avatars";

pub async fn create_test_account(pool: &PgPool, username: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO profiles (id, username, full_name) VALUES ($1, $2, 'Test User')")
        .bind(id)
        .bind(username)
        .execute(pool)
        .await
        .unwrap();
    id
}

pub async fn set_tier(pool: &PgPool, account_id: Uuid, tier: &str) {
    sqlx::query(
        "INSERT INTO subscriptions (account_id, tier) VALUES ($1, $2)
         ON CONFLICT (account_id) DO UPDATE SET tier = EXCLUDED.tier",
    )
    .bind(account_id)
    .bind(tier)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn create_test_link(pool: &PgPool, account_id: Uuid, title: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO links (account_id, title, url) VALUES ($1, $2, 'https://example.com') RETURNING id",
    )
    .bind(account_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_clicked_link(pool: &PgPool, account_id: Uuid, title: &str, clicks: i64) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO links (account_id, title, url, click_count)
         VALUES ($1, $2, 'https://example.com', $3) RETURNING id",
    )
    .bind(account_id)
    .bind(title)
    .bind(clicks)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a link waiting for activation at `NOW() + offset`.
pub async fn create_scheduled_link(pool: &PgPool, account_id: Uuid, offset: &str) -> Uuid {
    sqlx::query_scalar(&format!(
        "INSERT INTO links (account_id, title, url, is_active, is_scheduled, scheduled_at)
         VALUES ($1, 'Scheduled', 'https://example.com', FALSE, TRUE, NOW() + INTERVAL '{offset}')
         RETURNING id"
    ))
    .bind(account_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_links(pool: &PgPool, account_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Builds the state over PostgreSQL and a throwaway avatar directory.
///
/// Keep the returned directory alive for the duration of the test.
pub fn create_test_state(pool: PgPool) -> (AppState, TempDir) {
    let pool = Arc::new(pool);
    let avatars = TempDir::new().unwrap();

    let collaborators = Collaborators {
        links: Arc::new(PgLinkRepository::new(pool.clone())),
        subscriptions: Arc::new(PgSubscriptionRepository::new(pool.clone())),
        profiles: Arc::new(PgProfileRepository::new(pool.clone())),
        analytics: Arc::new(PgAnalyticsRepository::new(pool)),
        avatars: Arc::new(FsAvatarStorage::new(avatars.path(), AVATAR_BASE_URL)),
        notifier: Arc::new(TracingNotifier),
    };

    (
        AppState::new(collaborators, Some(Duration::from_secs(60))),
        avatars,
    )
}

pub fn make_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", account_routes())
        .with_state(state);
    TestServer::new(app).unwrap()
}

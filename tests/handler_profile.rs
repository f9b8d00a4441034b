mod common;

use axum::body::Bytes;
use serde_json::{Value, json};
use sqlx::PgPool;

const ACCOUNT_HEADER: &str = "X-Account-Id";

// ─── GET /api/profile ────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_get_profile(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .get("/api/profile")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["initials"], "TU");
    assert_eq!(body["avatar_url"], Value::Null);
}

#[sqlx::test]
async fn test_get_profile_missing(pool: PgPool) {
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .get("/api/profile")
        .add_header(ACCOUNT_HEADER, uuid::Uuid::new_v4().to_string())
        .await;

    response.assert_status_not_found();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "No profile found"
    );
}

// ─── PUT /api/profile ────────────────────────────────────────────────────────

#[sqlx::test]
async fn test_update_profile_normalizes_fields(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .put("/api/profile")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .json(&json!({
            "full_name": "  Ada Lovelace ",
            "username": "ada",
            "bio": "",
            "website": "example.com",
            "custom_url": "My Page!"
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["full_name"], "Ada Lovelace");
    assert_eq!(body["username"], "ada");
    assert_eq!(body["bio"], Value::Null);
    assert_eq!(body["website"], "https://example.com");
    assert_eq!(body["custom_url"], "mypage");
    assert_eq!(body["initials"], "AL");
}

#[sqlx::test]
async fn test_update_profile_keeps_http_website(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .put("/api/profile")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .json(&json!({ "website": "http://old.example.com" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["website"],
        "http://old.example.com"
    );
}

#[sqlx::test]
async fn test_update_profile_taken_custom_url(pool: PgPool) {
    let alice = common::create_test_account(&pool, "alice").await;
    let bob = common::create_test_account(&pool, "bob").await;
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    server
        .put("/api/profile")
        .add_header(ACCOUNT_HEADER, alice.to_string())
        .json(&json!({ "username": "alice", "custom_url": "shared" }))
        .await
        .assert_status_ok();

    server
        .put("/api/profile")
        .add_header(ACCOUNT_HEADER, bob.to_string())
        .json(&json!({ "username": "bob", "custom_url": "shared" }))
        .await
        .assert_status(axum::http::StatusCode::CONFLICT);
}

#[sqlx::test]
async fn test_update_profile_missing(pool: PgPool) {
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .put("/api/profile")
        .add_header(ACCOUNT_HEADER, uuid::Uuid::new_v4().to_string())
        .json(&json!({ "full_name": "Nobody" }))
        .await;

    response.assert_status_not_found();
}

// ─── PUT/DELETE /api/profile/avatar ──────────────────────────────────────────

#[sqlx::test]
async fn test_upload_avatar(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .put("/api/profile/avatar")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .bytes(Bytes::from_static(b"\x89PNG fake image"))
        .content_type("image/png")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["avatar_url"],
        format!("{}/{account}.png", common::AVATAR_BASE_URL)
    );
    assert!(avatars.path().join(format!("{account}.png")).exists());
}

#[sqlx::test]
async fn test_upload_avatar_unsupported_type(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let response = server
        .put("/api/profile/avatar")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .bytes(Bytes::from_static(b"<svg/>"))
        .content_type("image/svg+xml")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Please upload a valid image file (JPEG, PNG, WebP, or GIF)"
    );
    assert!(std::fs::read_dir(avatars.path()).unwrap().next().is_none());
}

#[sqlx::test]
async fn test_upload_avatar_too_large(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
    let response = server
        .put("/api/profile/avatar")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .bytes(Bytes::from(oversized))
        .content_type("image/jpeg")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "File size must be less than 5MB"
    );
}

#[sqlx::test]
async fn test_remove_avatar(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    server
        .put("/api/profile/avatar")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .bytes(Bytes::from_static(b"GIF89a"))
        .content_type("image/gif")
        .await
        .assert_status_ok();

    let response = server
        .delete("/api/profile/avatar")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["avatar_url"], Value::Null);
    assert!(!avatars.path().join(format!("{account}.gif")).exists());
}

#[sqlx::test]
async fn test_profile_update_keeps_avatar(pool: PgPool) {
    let account = common::create_test_account(&pool, "alice").await;
    let (state, _avatars) = common::create_test_state(pool);
    let server = common::make_server(state);

    server
        .put("/api/profile/avatar")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .bytes(Bytes::from_static(b"webp"))
        .content_type("image/webp")
        .await
        .assert_status_ok();

    let response = server
        .put("/api/profile")
        .add_header(ACCOUNT_HEADER, account.to_string())
        .json(&json!({ "full_name": "Alice" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["avatar_url"],
        format!("{}/{account}.webp", common::AVATAR_BASE_URL)
    );
}

//! API route configuration.
//!
//! Every API endpoint acts on the account named by the `X-Account-Id` header
//! (see [`crate::api::middleware::AccountId`]).

use crate::api::handlers::{
    analytics_handler, create_link_handler, delete_link_handler, get_profile_handler,
    limits_handler, list_links_handler, remove_avatar_handler, toggle_link_handler,
    update_link_handler, update_profile_handler, upload_avatar_handler,
};
use crate::domain::policy::MAX_AVATAR_BYTES;
use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
};

/// Headroom above the avatar limit so oversize files reach validation.
const AVATAR_BODY_LIMIT: usize = MAX_AVATAR_BYTES + 1024 * 1024;

/// All account-scoped API routes.
///
/// # Endpoints
///
/// - `GET    /links`               - List links with quota
/// - `POST   /links`               - Create a link (plan gated)
/// - `PATCH  /links/{id}`          - Update a link
/// - `DELETE /links/{id}`          - Delete a link (`?confirm=true`)
/// - `POST   /links/{id}/toggle`   - Toggle active/inactive
/// - `GET    /limits`              - Plan limits and quota
/// - `GET    /analytics`           - Analytics summary
/// - `GET    /profile`             - Read profile
/// - `PUT    /profile`             - Update profile
/// - `PUT    /profile/avatar`      - Upload avatar (raw image body)
/// - `DELETE /profile/avatar`      - Remove avatar
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/toggle", post(toggle_link_handler))
        .route("/limits", get(limits_handler))
        .route("/analytics", get(analytics_handler))
        .route(
            "/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route(
            "/profile/avatar",
            put(upload_avatar_handler)
                .delete(remove_avatar_handler)
                .layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
        )
}

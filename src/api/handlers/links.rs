//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::link::{
    DeleteLinkQuery, DeleteLinkResponse, LimitsResponse, LinkListResponse, LinkRequest,
    LinkResponse,
};
use crate::api::middleware::AccountId;
use crate::application::services::DeleteOutcome;
use crate::domain::entities::LinkDraft;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links with plan limits and quota.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Response
///
/// ```json
/// {
///   "links": [{ "id": "…", "title": "Blog", "state": "active", ... }],
///   "limits": { "linkLimit": 5, "advancedAnalyticsEnabled": false, ... },
///   "quota": { "used": 1, "limit": 5, "remaining": 4, "can_create": true, "upgrade_hint": null }
/// }
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
) -> Result<Json<LinkListResponse>, AppError> {
    let overview = state.link_service.list_links(account_id).await?;

    Ok(Json(LinkListResponse {
        links: overview.links.into_iter().map(LinkResponse::from).collect(),
        limits: overview.limits,
        quota: overview.quota,
    }))
}

/// Creates a link if the plan allows one more.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Launch page",
///   "url": "https://example.com/launch",
///   "is_scheduled": true,
///   "scheduled_at": "2030-01-01T09:00"
/// }
/// ```
///
/// # Errors
///
/// - `400` invalid form
/// - `403` link limit reached, or scheduling not in plan
/// - `409` slug already used, or a create is already running
pub async fn create_link_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let draft = LinkDraft::from(payload);
    let link = state.link_service.create_link(account_id, &draft).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Replaces the editable fields of a link.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// The body has the same shape as for create. Without a schedule, a stored
/// `scheduled_at` is cleared.
///
/// # Errors
///
/// - `400` invalid form
/// - `403` scheduling not in plan
/// - `404` link not found
pub async fn update_link_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let draft = LinkDraft::from(payload);
    let link = state
        .link_service
        .update_link(account_id, id, &draft)
        .await?;

    Ok(Json(link.into()))
}

/// Flips a link between active and inactive.
///
/// # Endpoint
///
/// `POST /api/links/{id}/toggle`
///
/// # Errors
///
/// - `404` link not found
/// - `409` link is waiting for its scheduled activation
pub async fn toggle_link_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.toggle_link(account_id, id).await?;
    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}?confirm=true`
///
/// Without `confirm=true` nothing happens and the response is
/// `{"deleted": false}`.
///
/// # Errors
///
/// - `404` link not found
pub async fn delete_link_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteLinkQuery>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let outcome = state
        .link_service
        .delete_link(account_id, id, query.confirm)
        .await?;

    Ok(Json(DeleteLinkResponse {
        deleted: outcome == DeleteOutcome::Deleted,
    }))
}

/// Returns the plan limits and a fresh quota.
///
/// # Endpoint
///
/// `GET /api/limits`
pub async fn limits_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
) -> Result<Json<LimitsResponse>, AppError> {
    let (limits, quota) = state.link_service.quota(account_id).await?;
    Ok(Json(LimitsResponse { limits, quota }))
}

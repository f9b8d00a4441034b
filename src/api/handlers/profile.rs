//! Handlers for profile and avatar endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
};
use validator::Validate;

use crate::api::dto::profile::{ProfileRequest, ProfileResponse};
use crate::api::middleware::AccountId;
use crate::domain::entities::ProfileDraft;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's profile.
///
/// # Endpoint
///
/// `GET /api/profile`
///
/// # Errors
///
/// - `404` no profile for this account
pub async fn get_profile_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profile_service.get_profile(account_id).await?;
    Ok(Json(profile.into()))
}

/// Normalizes and saves the profile form.
///
/// # Endpoint
///
/// `PUT /api/profile`
///
/// # Request Body
///
/// ```json
/// {
///   "full_name": "Ada Lovelace",
///   "username": "ada",
///   "bio": "Analyst",
///   "website": "example.com",
///   "custom_url": "Ada L"
/// }
/// ```
///
/// `website` is stored as `https://example.com`, `custom_url` as `adal`.
///
/// # Errors
///
/// - `400` field too long
/// - `404` no profile for this account
/// - `409` username or custom URL taken
pub async fn update_profile_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    payload.validate()?;

    let draft = ProfileDraft::from(payload);
    let profile = state
        .profile_service
        .update_profile(account_id, &draft)
        .await?;

    Ok(Json(profile.into()))
}

/// Uploads a new avatar from the raw request body.
///
/// # Endpoint
///
/// `PUT /api/profile/avatar`
///
/// The `Content-Type` header must be `image/jpeg`, `image/png`, `image/webp`
/// or `image/gif`; the body must not exceed 5 MiB.
///
/// # Errors
///
/// - `400` wrong type or too large
/// - `500` storage failure
pub async fn upload_avatar_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProfileResponse>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let profile = state
        .profile_service
        .upload_avatar(account_id, content_type, body.to_vec())
        .await?;

    Ok(Json(profile.into()))
}

/// Removes the avatar.
///
/// # Endpoint
///
/// `DELETE /api/profile/avatar`
pub async fn remove_avatar_handler(
    State(state): State<AppState>,
    AccountId(account_id): AccountId,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profile_service.remove_avatar(account_id).await?;
    Ok(Json(profile.into()))
}

//! Account identity extractor.
//!
//! Authentication happens upstream. A trusted gateway forwards the caller's
//! account id in the `X-Account-Id` header.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

/// Header carrying the authenticated account id.
pub const ACCOUNT_HEADER: &str = "x-account-id";

/// The account a request acts on.
///
/// # Errors
///
/// Rejects with `401 Unauthorized` if the header is missing or not a UUID.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(AccountId(account_id): AccountId) -> String {
///     account_id.to_string()
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountId(pub Uuid);

impl<S> FromRequestParts<S> for AccountId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(ACCOUNT_HEADER).ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "X-Account-Id header is missing" }),
            )
        })?;

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(AccountId)
            .ok_or_else(|| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "X-Account-Id header is not a valid UUID" }),
                )
            })
    }
}

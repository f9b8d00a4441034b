//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Link, LinkDraft, SubscriptionLimits};
use crate::domain::nullable::Nullable;
use crate::domain::policy::{LinkQuota, LinkState};

/// Request body for `POST /api/links` and `PATCH /api/links/{id}`.
///
/// The body is the whole link form; omitted text fields count as empty.
///
/// # `scheduled_at` semantics
///
/// Only honored together with `is_scheduled: true`. Absent, `null` and `""`
/// all mean "no schedule"; on update that clears a stored schedule.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LinkRequest {
    #[validate(length(max = 200, message = "Title is too long"))]
    #[serde(default)]
    pub title: String,

    #[validate(length(max = 2048, message = "URL is too long"))]
    #[serde(default)]
    pub url: String,

    #[validate(length(max = 100, message = "Slug is too long"))]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,

    #[validate(length(max = 2048, message = "Icon URL is too long"))]
    pub icon_url: Option<String>,

    /// Defaults to `true`.
    pub is_active: Option<bool>,

    #[serde(default)]
    pub is_scheduled: bool,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub scheduled_at: Option<Option<String>>,
}

impl From<LinkRequest> for LinkDraft {
    fn from(req: LinkRequest) -> Self {
        LinkDraft {
            title: req.title,
            url: req.url,
            slug: req.slug.unwrap_or_default(),
            description: req.description.unwrap_or_default(),
            icon_url: req.icon_url.unwrap_or_default(),
            is_active: req.is_active.unwrap_or(true),
            is_scheduled: req.is_scheduled,
            scheduled_at: Nullable::from_double_option(req.scheduled_at)
                .into_option()
                .unwrap_or_default(),
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub is_active: bool,
    pub is_scheduled: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub state: LinkState,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        let state = LinkState::of(&link);
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            slug: link.slug,
            description: link.description,
            icon_url: link.icon_url,
            is_active: link.is_active,
            is_scheduled: link.is_scheduled,
            scheduled_at: link.scheduled_at,
            state,
            click_count: link.click_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
    pub limits: SubscriptionLimits,
    pub quota: LinkQuota,
}

/// Query for `DELETE /api/links/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteLinkQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub deleted: bool,
}

/// Response for `GET /api/limits`.
#[derive(Debug, Serialize)]
pub struct LimitsResponse {
    pub limits: SubscriptionLimits,
    pub quota: LinkQuota,
}

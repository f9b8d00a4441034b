//! DTOs for profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Profile, ProfileDraft};
use crate::domain::policy::initials;

/// Request body for `PUT /api/profile`.
///
/// `avatar_url` is managed through `/api/profile/avatar` and ignored here.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileRequest {
    #[validate(length(max = 100, message = "Full name is too long"))]
    pub full_name: String,

    #[validate(length(max = 50, message = "Username is too long"))]
    pub username: String,

    #[validate(length(max = 500, message = "Bio is too long"))]
    pub bio: String,

    #[validate(length(max = 2048, message = "Website is too long"))]
    pub website: String,

    #[validate(length(max = 100, message = "Custom URL is too long"))]
    pub custom_url: String,
}

impl From<ProfileRequest> for ProfileDraft {
    fn from(req: ProfileRequest) -> Self {
        ProfileDraft {
            full_name: req.full_name,
            username: req.username,
            bio: req.bio,
            website: req.website,
            custom_url: req.custom_url,
            avatar_url: None,
        }
    }
}

/// JSON representation of a profile.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    /// Fallback shown when there is no avatar.
    pub initials: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub custom_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        let initials = initials(p.full_name.as_deref().unwrap_or_default());
        Self {
            id: p.id,
            full_name: p.full_name,
            username: p.username,
            avatar_url: p.avatar_url,
            initials,
            bio: p.bio,
            website: p.website,
            custom_url: p.custom_url,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

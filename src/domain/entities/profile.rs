//! Public profile entity and the typed profile form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A public profile. The id is the owning account id.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub custom_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw profile form as submitted by a user.
///
/// `avatar_url` is owned by the avatar upload flow and travels untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub full_name: String,
    pub username: String,
    pub bio: String,
    pub website: String,
    pub custom_url: String,
    pub avatar_url: Option<String>,
}

impl From<&Profile> for ProfileDraft {
    fn from(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            username: profile.username.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
            website: profile.website.clone().unwrap_or_default(),
            custom_url: profile.custom_url.clone().unwrap_or_default(),
            avatar_url: profile.avatar_url.clone(),
        }
    }
}

impl From<&ProfileRecord> for ProfileDraft {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            full_name: record.full_name.clone().unwrap_or_default(),
            username: record.username.clone().unwrap_or_default(),
            bio: record.bio.clone().unwrap_or_default(),
            website: record.website.clone().unwrap_or_default(),
            custom_url: record.custom_url.clone().unwrap_or_default(),
            avatar_url: record.avatar_url.clone(),
        }
    }
}

/// Persistence-ready profile produced by the profile normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileRecord {
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub custom_url: Option<String>,
    pub avatar_url: Option<String>,
}

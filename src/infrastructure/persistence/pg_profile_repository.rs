//! PostgreSQL implementation of profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Profile, ProfileRecord};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;

const PROFILE_COLUMNS: &str =
    "id, full_name, username, avatar_url, bio, website, custom_url, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    full_name: Option<String>,
    username: Option<String>,
    avatar_url: Option<String>,
    bio: Option<String>,
    website: Option<String>,
    custom_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Profile {
            id: r.id,
            full_name: r.full_name,
            username: r.username,
            avatar_url: r.avatar_url,
            bio: r.bio,
            website: r.website,
            custom_url: r.custom_url,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for public profiles.
pub struct PgProfileRepository {
    pool: Arc<PgPool>,
}

impl PgProfileRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Provisions an empty profile for a new account.
    ///
    /// Used by the admin CLI; the HTTP API never creates profiles.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the account already has a profile.
    pub async fn provision(&self, account_id: Uuid, username: Option<&str>) -> Result<Profile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO profiles (id, username) VALUES ($1, $2) RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(account_id)
        .bind(username)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}

fn no_profile(account_id: Uuid) -> AppError {
    AppError::not_found("No profile found", json!({ "account_id": account_id }))
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find(&self, account_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(account_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Profile::from))
    }

    async fn update(&self, account_id: Uuid, record: ProfileRecord) -> Result<Profile, AppError> {
        // A form without avatar_url keeps the stored one; removal goes
        // through set_avatar_url.
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE profiles SET
                full_name = $2,
                username = $3,
                bio = $4,
                website = $5,
                custom_url = $6,
                avatar_url = COALESCE($7, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(&record.full_name)
        .bind(&record.username)
        .bind(&record.bio)
        .bind(&record.website)
        .bind(&record.custom_url)
        .bind(&record.avatar_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::from).ok_or_else(|| no_profile(account_id))
    }

    async fn set_avatar_url(
        &self,
        account_id: Uuid,
        avatar_url: Option<String>,
    ) -> Result<Profile, AppError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE profiles SET avatar_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(avatar_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Profile::from).ok_or_else(|| no_profile(account_id))
    }
}

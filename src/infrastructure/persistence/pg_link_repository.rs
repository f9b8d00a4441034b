//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkRecord};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, account_id, title, url, slug, description, icon_url, \
     is_active, is_scheduled, scheduled_at, click_count, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    account_id: Uuid,
    title: String,
    url: String,
    slug: Option<String>,
    description: Option<String>,
    icon_url: Option<String>,
    is_active: bool,
    is_scheduled: bool,
    scheduled_at: Option<DateTime<Utc>>,
    click_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            account_id: r.account_id,
            title: r.title,
            url: r.url,
            slug: r.slug,
            description: r.description,
            icon_url: r.icon_url,
            is_active: r.is_active,
            is_scheduled: r.is_scheduled,
            scheduled_at: r.scheduled_at,
            click_count: r.click_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// The link limit is enforced again by the `links_enforce_limit` trigger on
/// insert.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found("Link not found", json!({ "id": id }))
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn list(&self, account_id: Uuid) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE account_id = $1 ORDER BY created_at DESC"
        ))
        .bind(account_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn count(&self, account_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE account_id = $1")
            .bind(account_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find(&self, account_id: Uuid, id: Uuid) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE account_id = $1 AND id = $2"
        ))
        .bind(account_id)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn create(&self, account_id: Uuid, record: LinkRecord) -> Result<Link, AppError> {
        // An absent schedule is stored as NULL.
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links
                (account_id, title, url, slug, description, icon_url,
                 is_active, is_scheduled, scheduled_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(&record.title)
        .bind(&record.url)
        .bind(&record.slug)
        .bind(&record.description)
        .bind(&record.icon_url)
        .bind(record.is_active)
        .bind(record.is_scheduled)
        .bind(record.scheduled_at.as_option().copied())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        record: LinkRecord,
    ) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links SET
                title = $3,
                url = $4,
                slug = $5,
                description = $6,
                icon_url = $7,
                is_active = $8,
                is_scheduled = $9,
                scheduled_at = CASE WHEN $10 THEN scheduled_at ELSE $11 END,
                updated_at = NOW()
            WHERE account_id = $1 AND id = $2
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(id)
        .bind(&record.title)
        .bind(&record.url)
        .bind(&record.slug)
        .bind(&record.description)
        .bind(&record.icon_url)
        .bind(record.is_active)
        .bind(record.is_scheduled)
        .bind(record.scheduled_at.is_absent())
        .bind(record.scheduled_at.as_option().copied())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or_else(|| not_found(id))
    }

    async fn set_active(
        &self,
        account_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links SET is_active = $3, updated_at = NOW()
            WHERE account_id = $1 AND id = $2
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(id)
        .bind(is_active)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::from).ok_or_else(|| not_found(id))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE account_id = $1 AND id = $2")
            .bind(account_id)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn activate_due(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET is_active = TRUE, is_scheduled = FALSE, updated_at = NOW()
            WHERE is_scheduled
              AND NOT is_active
              AND scheduled_at IS NOT NULL
              AND scheduled_at <= $1
            "#,
        )
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

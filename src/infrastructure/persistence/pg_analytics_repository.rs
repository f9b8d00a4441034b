//! PostgreSQL implementation of analytics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{LinkAnalytics, TopLink};
use crate::domain::repositories::{AnalyticsRepository, TOP_LINKS};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TotalsRow {
    total_links: i64,
    active_links: i64,
    total_clicks: i64,
}

#[derive(sqlx::FromRow)]
struct TopLinkRow {
    id: Uuid,
    title: String,
    url: String,
    click_count: i64,
}

/// Aggregates click counters kept on the links table.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn fetch(&self, account_id: Uuid) -> Result<LinkAnalytics, AppError> {
        let totals = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT
                COUNT(*)                                  AS total_links,
                COUNT(*) FILTER (WHERE is_active)         AS active_links,
                COALESCE(SUM(click_count), 0)::BIGINT     AS total_clicks
            FROM links
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        let top = sqlx::query_as::<_, TopLinkRow>(
            r#"
            SELECT id, title, url, click_count
            FROM links
            WHERE account_id = $1
            ORDER BY click_count DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(TOP_LINKS)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(LinkAnalytics {
            total_links: totals.total_links,
            active_links: totals.active_links,
            total_clicks: totals.total_clicks,
            top_performing_links: top
                .into_iter()
                .map(|r| TopLink {
                    id: r.id,
                    title: r.title,
                    url: r.url,
                    click_count: r.click_count,
                })
                .collect(),
        })
    }
}

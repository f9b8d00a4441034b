//! PostgreSQL implementation of subscription repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{SubscriptionLimits, SubscriptionTier};
use crate::domain::repositories::SubscriptionRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct PlanRow {
    tier: String,
    subscribed: bool,
    link_limit: i64,
    advanced_analytics_enabled: bool,
    link_scheduling_enabled: bool,
}

impl PlanRow {
    fn tier(&self) -> Result<SubscriptionTier, AppError> {
        self.tier
            .parse::<SubscriptionTier>()
            .map_err(|e| AppError::internal("Unknown subscription tier", json!({ "tier": e.0 })))
    }

    fn into_limits(self) -> Result<SubscriptionLimits, AppError> {
        let tier = self.tier()?;
        Ok(SubscriptionLimits {
            link_limit: self.link_limit,
            advanced_analytics_enabled: self.advanced_analytics_enabled,
            link_scheduling_enabled: self.link_scheduling_enabled,
            subscription_tier: self.subscribed.then_some(tier),
        })
    }
}

/// A plan as stored in `subscription_plans`.
#[derive(Debug, Clone)]
pub struct Plan {
    pub tier: SubscriptionTier,
    pub limits: SubscriptionLimits,
}

/// Reads plan limits from the `subscriptions` and `subscription_plans` tables.
///
/// Accounts without a subscription row resolve to the `free` plan with
/// `subscription_tier = None`.
pub struct PgSubscriptionRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriptionRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Lists every plan, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or an unknown tier.
    pub async fn list_plans(&self) -> Result<Vec<Plan>, AppError> {
        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT tier, TRUE AS subscribed, link_limit,
                   advanced_analytics_enabled, link_scheduling_enabled
            FROM subscription_plans
            ORDER BY CASE WHEN link_limit = -1 THEN 1 ELSE 0 END, link_limit
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|row| {
                let limits = row.into_limits()?;
                Ok(Plan {
                    tier: limits.tier(),
                    limits,
                })
            })
            .collect()
    }

    /// Puts an account on a plan, replacing any previous subscription.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an account without a profile and
    /// [`AppError::Internal`] on other database errors.
    pub async fn assign_tier(&self, account_id: Uuid, tier: SubscriptionTier) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (account_id, tier)
            VALUES ($1, $2)
            ON CONFLICT (account_id) DO UPDATE SET tier = EXCLUDED.tier, updated_at = NOW()
            "#,
        )
        .bind(account_id)
        .bind(tier.as_str())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn fetch(&self, account_id: Uuid) -> Result<SubscriptionLimits, AppError> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            WITH sub AS (SELECT tier FROM subscriptions WHERE account_id = $1)
            SELECT p.tier,
                   EXISTS (SELECT 1 FROM sub) AS subscribed,
                   p.link_limit,
                   p.advanced_analytics_enabled,
                   p.link_scheduling_enabled
            FROM subscription_plans p
            WHERE p.tier = COALESCE((SELECT tier FROM sub), 'free')
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| {
            AppError::internal(
                "Subscription plan missing",
                json!({ "account_id": account_id }),
            )
        })?
        .into_limits()
    }
}

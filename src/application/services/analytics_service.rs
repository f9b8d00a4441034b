//! Analytics summary for the dashboard.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::SubscriptionService;
use crate::domain::entities::{SubscriptionTier, TopLink};
use crate::domain::repositories::{AnalyticsRepository, TOP_LINKS};
use crate::error::AppError;

/// What the analytics view shows for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub plan: SubscriptionTier,
    pub plan_label: &'static str,
    /// Premium and Enterprise plans get the advanced view.
    pub advanced: bool,
    pub total_links: i64,
    pub active_links: i64,
    pub total_clicks: i64,
    pub average_clicks_per_link: i64,
    pub top_performing_links: Vec<TopLink>,
}

pub struct AnalyticsService {
    analytics: Arc<dyn AnalyticsRepository>,
    subscriptions: Arc<SubscriptionService>,
}

impl AnalyticsService {
    pub fn new(
        analytics: Arc<dyn AnalyticsRepository>,
        subscriptions: Arc<SubscriptionService>,
    ) -> Self {
        Self {
            analytics,
            subscriptions,
        }
    }

    /// Builds the report, keeping at most five top links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn report(&self, account_id: Uuid) -> Result<AnalyticsReport, AppError> {
        let limits = self.subscriptions.limits(account_id).await;
        let mut summary = self.analytics.fetch(account_id).await?;

        let average = summary.average_clicks_per_link();
        summary.top_performing_links.truncate(TOP_LINKS as usize);

        let plan = limits.tier();
        Ok(AnalyticsReport {
            plan,
            plan_label: plan.label(),
            advanced: limits.advanced_analytics_enabled,
            total_links: summary.total_links,
            active_links: summary.active_links,
            total_clicks: summary.total_clicks,
            average_clicks_per_link: average,
            top_performing_links: summary.top_performing_links,
        })
    }
}

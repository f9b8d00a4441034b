//! Subscription limits lookup.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::SubscriptionLimits;
use crate::domain::repositories::SubscriptionRepository;

/// Resolves the plan limits that gate link creation and scheduling.
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    /// Current limits of the account.
    ///
    /// Falls back to the free plan when billing cannot be reached, so a
    /// lookup failure never grants more than the free allowance.
    pub async fn limits(&self, account_id: Uuid) -> SubscriptionLimits {
        match self.repository.fetch(account_id).await {
            Ok(limits) => limits,
            Err(e) => {
                tracing::warn!(%account_id, error = %e, "Falling back to free plan limits");
                SubscriptionLimits::free()
            }
        }
    }
}

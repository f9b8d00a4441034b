//! Repository trait for subscription limits.

use crate::domain::entities::SubscriptionLimits;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Read-only access to the limits billing assigns to an account.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSubscriptionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fetches the current limits of an account.
    ///
    /// Accounts without a subscription are on the free plan.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or a missing plan row.
    async fn fetch(&self, account_id: Uuid) -> Result<SubscriptionLimits, AppError>;
}

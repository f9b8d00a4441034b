//! Repository trait for link analytics.

use crate::domain::entities::LinkAnalytics;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Number of links returned in `top_performing_links`.
pub const TOP_LINKS: i64 = 5;

/// Read-only analytics over an account's links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAnalyticsRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Fetches totals and the most clicked links of an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn fetch(&self, account_id: Uuid) -> Result<LinkAnalytics, AppError>;
}

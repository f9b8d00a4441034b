//! Repository trait for link data access.

use crate::domain::entities::{Link, LinkRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for an account's links.
///
/// Every lookup is scoped to the owning account; a link of another account is
/// reported as missing.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Lists the account's links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, account_id: Uuid) -> Result<Vec<Link>, AppError>;

    /// Counts the account's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, account_id: Uuid) -> Result<i64, AppError>;

    /// Finds one link of the account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, account_id: Uuid, id: Uuid) -> Result<Option<Link>, AppError>;

    /// Inserts a normalized record.
    ///
    /// An absent `scheduled_at` leaves the column at its default.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the slug is already used by the account.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, account_id: Uuid, record: LinkRecord) -> Result<Link, AppError>;

    /// Replaces the editable fields of a link.
    ///
    /// `scheduled_at`: absent keeps the stored value, null clears it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist for this account.
    /// Returns [`AppError::Conflict`] on a slug clash.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, account_id: Uuid, id: Uuid, record: LinkRecord)
    -> Result<Link, AppError>;

    /// Sets the active flag of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist for this account.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_active(&self, account_id: Uuid, id: Uuid, is_active: bool)
    -> Result<Link, AppError>;

    /// Deletes a link.
    ///
    /// Returns `Ok(false)` if no such link exists for this account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, account_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Activates every pending scheduled link whose time has come.
    ///
    /// Sets `is_active = true` and `is_scheduled = false`, keeping
    /// `scheduled_at` as history. Returns the number of activated links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn activate_due(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    /// Checks that the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}

//! Repository trait for public profiles.

use crate::domain::entities::{Profile, ProfileRecord};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for account profiles.
///
/// Profiles are provisioned with the account; this interface never creates one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the account's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, account_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Writes a normalized record over the profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account has no profile.
    /// Returns [`AppError::Conflict`] if `username` or `custom_url` is taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, account_id: Uuid, record: ProfileRecord) -> Result<Profile, AppError>;

    /// Sets or clears the avatar URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account has no profile.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_avatar_url(
        &self,
        account_id: Uuid,
        avatar_url: Option<String>,
    ) -> Result<Profile, AppError>;
}

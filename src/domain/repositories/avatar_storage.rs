//! Storage port for avatar images.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::policy::AvatarFormat;

/// Stores and removes an account's avatar image.
///
/// Failures are reported as `None` / `false`; implementations log the cause.
/// Size and type are validated by the caller before `upload` is invoked.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::FsAvatarStorage`] - local directory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarStorage: Send + Sync {
    /// Stores the image and returns its public URL.
    async fn upload(&self, account_id: Uuid, format: AvatarFormat, bytes: Vec<u8>)
    -> Option<String>;

    /// Removes the account's image. Returns true when nothing remains stored.
    async fn remove(&self, account_id: Uuid) -> bool;
}

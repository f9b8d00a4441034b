//! Collaborator trait definitions for the domain layer.
//!
//! Each trait is a contract with an external system: the database, billing,
//! file storage, or the presentation layer's notification area. Concrete
//! implementations live in `crate::infrastructure`.
//!
//! # Available Collaborators
//!
//! - [`LinkRepository`] - Link CRUD and scheduled activation
//! - [`SubscriptionRepository`] - Plan limits per account
//! - [`ProfileRepository`] - Public profile persistence
//! - [`AnalyticsRepository`] - Click totals and top links
//! - [`AvatarStorage`] - Avatar image storage
//! - [`Notifier`] - Outcome notifications
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` under `cfg(test)`.

pub mod analytics_repository;
pub mod avatar_storage;
pub mod link_repository;
pub mod notifier;
pub mod profile_repository;
pub mod subscription_repository;

pub use analytics_repository::{AnalyticsRepository, TOP_LINKS};
pub use avatar_storage::AvatarStorage;
pub use link_repository::LinkRepository;
pub use notifier::{Notification, NotificationLevel, Notifier};
pub use profile_repository::ProfileRepository;
pub use subscription_repository::SubscriptionRepository;

#[cfg(test)]
pub use analytics_repository::MockAnalyticsRepository;
#[cfg(test)]
pub use avatar_storage::MockAvatarStorage;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use notifier::MockNotifier;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;

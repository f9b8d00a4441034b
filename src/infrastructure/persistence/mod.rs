//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` structs.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, toggles and scheduled activation
//! - [`PgSubscriptionRepository`] - Plan limits per account
//! - [`PgProfileRepository`] - Public profiles
//! - [`PgAnalyticsRepository`] - Click totals and top links

pub mod pg_analytics_repository;
pub mod pg_link_repository;
pub mod pg_profile_repository;
pub mod pg_subscription_repository;

pub use pg_analytics_repository::PgAnalyticsRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_subscription_repository::{PgSubscriptionRepository, Plan};

//! Business logic services for the application layer.

pub mod analytics_service;
pub mod link_service;
pub mod profile_service;
pub mod subscription_service;

pub use analytics_service::{AnalyticsReport, AnalyticsService};
pub use link_service::{DeleteOutcome, LinkOverview, LinkService};
pub use profile_service::ProfileService;
pub use subscription_service::SubscriptionService;

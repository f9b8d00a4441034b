//! Application layer services implementing business logic.
//!
//! Services orchestrate the pure rules in [`crate::domain::policy`] against the
//! collaborator traits and give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - Link listing, gated creation, edits, toggles, deletes
//! - [`services::ProfileService`] - Profile edits and avatar upload
//! - [`services::SubscriptionService`] - Plan limits with free-plan fallback
//! - [`services::AnalyticsService`] - Per-account analytics summary
//!
//! [`in_flight::InFlight`] rejects duplicate concurrent submissions.

pub mod in_flight;
pub mod services;

//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A shareable link owned by an account
//! - [`Profile`] - The account's public profile
//! - [`SubscriptionLimits`] - Feature gates derived from the account's plan
//! - [`LinkAnalytics`] - Click totals and top links
//!
//! # Design Pattern
//!
//! User input arrives as typed drafts (`LinkDraft`, `ProfileDraft`) and leaves
//! the normalizers as persistence-ready records (`LinkRecord`, `ProfileRecord`).

pub mod analytics;
pub mod link;
pub mod profile;
pub mod subscription;

pub use analytics::{LinkAnalytics, TopLink};
pub use link::{Link, LinkDraft, LinkRecord};
pub use profile::{Profile, ProfileDraft, ProfileRecord};
pub use subscription::{SubscriptionLimits, SubscriptionTier, UNLIMITED_LINKS};

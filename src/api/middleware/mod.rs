//! HTTP middleware for request processing and protection.
//!
//! Provides the account extractor, rate limiting, and observability middleware.

pub mod account;
pub mod rate_limit;
pub mod tracing;

pub use account::{ACCOUNT_HEADER, AccountId};

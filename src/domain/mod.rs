//! Domain layer containing business entities and rules.
//!
//! Everything here is independent of HTTP and SQL. Services in
//! [`crate::application::services`] orchestrate these rules against the
//! collaborators declared in [`repositories`].
//!
//! # Architecture
//!
//! - [`entities`] - Links, profiles, subscription limits, analytics
//! - [`policy`] - Pure rules: link limits, normalizers, avatar checks, link states
//! - [`repositories`] - Collaborator trait definitions
//! - [`nullable`] - Tri-state field for "omit" versus "clear"
//! - [`activation_worker`] - Periodic activation of due scheduled links
//!
//! # Scheduled Link Flow
//!
//! 1. A link created with a schedule is stored inactive with `is_scheduled = true`
//! 2. [`activation_worker::run_activation_worker`] sweeps on an interval
//! 3. Due links are activated via [`repositories::LinkRepository::activate_due`]

pub mod activation_worker;
pub mod entities;
pub mod nullable;
pub mod policy;
pub mod repositories;

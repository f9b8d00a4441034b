//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`storage`] - Avatar image storage
//! - [`notify`] - Notification sinks

pub mod notify;
pub mod persistence;
pub mod storage;

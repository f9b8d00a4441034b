//! HTTP request handlers for API endpoints.
//!
//! Handlers extract the caller's [`crate::api::middleware::AccountId`], call
//! one service operation, and map the result to a DTO.

pub mod analytics;
pub mod health;
pub mod links;
pub mod profile;

pub use analytics::analytics_handler;
pub use health::health_handler;
pub use links::{
    create_link_handler, delete_link_handler, limits_handler, list_links_handler,
    toggle_link_handler, update_link_handler,
};
pub use profile::{
    get_profile_handler, remove_avatar_handler, update_profile_handler, upload_avatar_handler,
};

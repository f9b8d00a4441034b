//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check (public)
//! - `/api/*`            - Account-scoped REST API
//! - `/avatars/*`        - Stored avatar images
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (proxy-aware when configured)
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Where avatars are served from.
#[derive(Debug, Clone)]
pub struct AvatarMount<'a> {
    /// URL path prefix, e.g. `/avatars`.
    pub route: &'a str,
    pub dir: &'a Path,
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `avatars` - serves stored avatars when the base URL is a local path
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    avatars: Option<AvatarMount<'_>>,
) -> NormalizePath<Router> {
    let api_router = if behind_proxy {
        api::routes::account_routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::account_routes().layer(rate_limit::layer())
    };

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router);

    if let Some(mount) = avatars {
        router = router.nest_service(mount.route, ServeDir::new(mount.dir));
    }

    let router = router.with_state(state).layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

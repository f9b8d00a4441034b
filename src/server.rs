//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, the activation worker, and the Axum
//! server lifecycle.

use crate::config::Config;
use crate::domain::activation_worker::run_activation_worker;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::notify::TracingNotifier;
use crate::infrastructure::persistence::{
    PgAnalyticsRepository, PgLinkRepository, PgProfileRepository, PgSubscriptionRepository,
};
use crate::infrastructure::storage::FsAvatarStorage;
use crate::routes::{AvatarMount, app_router};
use crate::state::{AppState, Collaborators};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the connection pool with the configured limits.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn connect(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Avatar directory
/// - Background activation worker (unless disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tokio::fs::create_dir_all(&config.avatar_dir)
        .await
        .with_context(|| format!("Cannot create {}", config.avatar_dir.display()))?;

    let pool = Arc::new(pool);
    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));

    let activation_interval = config.activation_interval();
    if let Some(every) = activation_interval {
        tokio::spawn(run_activation_worker(links.clone(), every));
    } else {
        tracing::info!("Activation worker disabled");
    }

    let state = AppState::new(
        Collaborators {
            links,
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool.clone())),
            profiles: Arc::new(PgProfileRepository::new(pool.clone())),
            analytics: Arc::new(PgAnalyticsRepository::new(pool.clone())),
            avatars: Arc::new(FsAvatarStorage::new(
                &config.avatar_dir,
                &config.avatar_base_url,
            )),
            notifier: Arc::new(TracingNotifier),
        },
        activation_interval,
    );

    let avatars = config.avatar_route().map(|route| AvatarMount {
        route,
        dir: &config.avatar_dir,
    });
    let app = app_router(state, config.behind_proxy, avatars);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

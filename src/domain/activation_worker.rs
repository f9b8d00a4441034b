//! Background activation of scheduled links.
//!
//! A link created with a future schedule waits in `ScheduledPending`. This
//! worker wakes up on a fixed interval and flips every due link to active.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{self, MissedTickBehavior};

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Runs one activation pass and returns the number of activated links.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn sweep_once(
    links: &dyn LinkRepository,
    now: DateTime<Utc>,
) -> Result<u64, AppError> {
    let activated = links.activate_due(now).await?;
    if activated > 0 {
        metrics::counter!("scheduled_links_activated_total").increment(activated);
        tracing::info!(activated, "Activated scheduled links");
    }
    Ok(activated)
}

/// Sweeps for due links every `every` until the task is dropped.
///
/// Errors are logged and the next tick retries from scratch.
pub async fn run_activation_worker(links: Arc<dyn LinkRepository>, every: Duration) {
    let mut ticker = time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(interval_secs = every.as_secs(), "Activation worker started");

    loop {
        ticker.tick().await;
        if let Err(e) = sweep_once(links.as_ref(), Utc::now()).await {
            tracing::warn!(error = %e, "Scheduled link sweep failed");
        }
    }
}

//! Notifier that records outcome messages as structured log events.

use crate::domain::repositories::{Notification, NotificationLevel, Notifier};

/// Emits each notification as a `tracing` event under the `notification` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => tracing::info!(
                target: "notification",
                description = %notification.description,
                "{}",
                notification.title
            ),
            NotificationLevel::Error => tracing::warn!(
                target: "notification",
                description = %notification.description,
                "{}",
                notification.title
            ),
        }
    }
}

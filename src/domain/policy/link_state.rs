//! Activation state of a link.
//!
//! ```text
//! Draft ──► Active ◄──► Inactive
//!   │          ▲
//!   ▼          │ (scheduler, at/after scheduled_at)
//! ScheduledPending
//!
//! any ──► Deleted
//! ```
//!
//! Manual toggles only move between `Active` and `Inactive`. Leaving
//! `ScheduledPending` is the scheduler's job.

use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{Link, LinkRecord};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    Draft,
    Active,
    Inactive,
    ScheduledPending,
    Deleted,
}

impl LinkState {
    /// State of a stored link.
    pub fn of(link: &Link) -> Self {
        if link.is_active {
            Self::Active
        } else if link.is_pending_activation() {
            Self::ScheduledPending
        } else {
            Self::Inactive
        }
    }

    /// State a freshly normalized record enters when it leaves `Draft`.
    pub fn initial(record: &LinkRecord) -> Self {
        if record.is_scheduled && !record.is_active {
            Self::ScheduledPending
        } else if record.is_active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Target of a manual active/inactive toggle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] for states that cannot be toggled by hand.
    pub fn toggled(self) -> Result<LinkState, AppError> {
        match self {
            Self::Active => Ok(Self::Inactive),
            Self::Inactive => Ok(Self::Active),
            other => Err(AppError::conflict(
                "Link cannot be toggled in its current state",
                json!({ "state": other }),
            )),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::ScheduledPending => "Scheduled",
            Self::Deleted => "Deleted",
        }
    }
}

//! At most one in-flight request per (account, operation).
//!
//! A second submission of the same operation while the first is still running
//! is rejected instead of queued.

use std::sync::Arc;

use dashmap::DashSet;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

/// Mutating operations guarded against duplicate submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LinkMutation,
    LinkDelete,
    ProfileUpdate,
    AvatarUpload,
}

/// Registry of operations currently running.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    running: Arc<DashSet<(Uuid, Operation)>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `operation` as running for the account.
    ///
    /// The returned permit releases the slot when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the same operation is already running.
    pub fn begin(&self, account_id: Uuid, operation: Operation) -> Result<InFlightPermit, AppError> {
        let key = (account_id, operation);
        if !self.running.insert(key) {
            tracing::debug!(%account_id, ?operation, "Rejected duplicate submission");
            return Err(AppError::conflict(
                "Operation already in progress",
                json!({ "operation": operation }),
            ));
        }

        Ok(InFlightPermit {
            running: self.running.clone(),
            key,
        })
    }

    pub fn is_running(&self, account_id: Uuid, operation: Operation) -> bool {
        self.running.contains(&(account_id, operation))
    }
}

/// Held for the duration of a guarded operation.
#[derive(Debug)]
pub struct InFlightPermit {
    running: Arc<DashSet<(Uuid, Operation)>>,
    key: (Uuid, Operation),
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.running.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_rejected() {
        let guard = InFlight::new();
        let account = Uuid::new_v4();

        let _permit = guard.begin(account, Operation::ProfileUpdate).unwrap();
        let second = guard.begin(account, Operation::ProfileUpdate);

        assert!(matches!(second, Err(AppError::Conflict { .. })));
    }

    #[test]
    fn test_drop_releases_slot() {
        let guard = InFlight::new();
        let account = Uuid::new_v4();

        let permit = guard.begin(account, Operation::AvatarUpload).unwrap();
        assert!(guard.is_running(account, Operation::AvatarUpload));
        drop(permit);

        assert!(!guard.is_running(account, Operation::AvatarUpload));
        assert!(guard.begin(account, Operation::AvatarUpload).is_ok());
    }

    #[test]
    fn test_operations_and_accounts_are_independent() {
        let guard = InFlight::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let _p1 = guard.begin(a, Operation::LinkMutation).unwrap();
        assert!(guard.begin(a, Operation::LinkDelete).is_ok());
        assert!(guard.begin(b, Operation::LinkMutation).is_ok());
    }
}

//! Plan-based link gating.
//!
//! Pure functions of the current link count and the account's limits. Callers
//! must pass a count observed at submission time and re-evaluate after every
//! create or delete.

use serde::Serialize;

use crate::domain::entities::{SubscriptionLimits, UNLIMITED_LINKS};

/// Returns true if the account may create one more link.
pub fn can_create_link(current_count: i64, limits: &SubscriptionLimits) -> bool {
    debug_assert!(current_count >= 0, "link count cannot be negative");
    limits.link_limit == UNLIMITED_LINKS || current_count < limits.link_limit
}

/// Number of links the account may still create, or `-1` when unlimited.
pub fn remaining_links(current_count: i64, limits: &SubscriptionLimits) -> i64 {
    if limits.link_limit == UNLIMITED_LINKS {
        return UNLIMITED_LINKS;
    }
    (limits.link_limit - current_count).max(0)
}

/// Returns true if the plan allows scheduled activation.
pub fn can_schedule(limits: &SubscriptionLimits) -> bool {
    limits.link_scheduling_enabled
}

/// Link usage against the plan, as shown next to the "Add Link" control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkQuota {
    pub used: i64,
    /// `None` when the plan is unlimited.
    pub limit: Option<i64>,
    /// `None` when the plan is unlimited.
    pub remaining: Option<i64>,
    pub can_create: bool,
    /// Set only when the limit is reached.
    pub upgrade_hint: Option<&'static str>,
}

impl LinkQuota {
    pub fn evaluate(current_count: i64, limits: &SubscriptionLimits) -> Self {
        let can_create = can_create_link(current_count, limits);
        let unlimited = limits.is_unlimited();

        Self {
            used: current_count,
            limit: (!unlimited).then_some(limits.link_limit),
            remaining: (!unlimited).then(|| remaining_links(current_count, limits)),
            can_create,
            upgrade_hint: (!can_create).then(|| upgrade_hint(limits)),
        }
    }
}

fn upgrade_hint(limits: &SubscriptionLimits) -> &'static str {
    if limits.tier().is_paid() {
        "Upgrade your plan to add more links."
    } else {
        "Upgrade to a paid plan to add more links."
    }
}

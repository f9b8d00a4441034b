//! Subscription tiers and the per-account limits derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `link_limit` value meaning "no limit".
pub const UNLIMITED_LINKS: i64 = -1;

/// Link limit of the free plan when billing data is unavailable.
pub const FREE_LINK_LIMIT: i64 = 5;

/// Subscription level controlling feature gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
    Enterprise,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Enterprise => "enterprise",
        }
    }

    /// Returns true for tiers billed to the account.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Display label, e.g. "Premium Plan".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free Plan",
            Self::Premium => "Premium Plan",
            Self::Enterprise => "Enterprise Plan",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subscription tier '{0}'")]
pub struct UnknownTier(pub String);

impl FromStr for SubscriptionTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            "enterprise" => Ok(Self::Enterprise),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// Feature limits of an account, derived from its billing state.
///
/// Read-only to this service. `subscription_tier: None` means the free plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionLimits {
    pub link_limit: i64,
    pub advanced_analytics_enabled: bool,
    pub link_scheduling_enabled: bool,
    pub subscription_tier: Option<SubscriptionTier>,
}

impl SubscriptionLimits {
    /// Limits of the free plan.
    pub fn free() -> Self {
        Self {
            link_limit: FREE_LINK_LIMIT,
            advanced_analytics_enabled: false,
            link_scheduling_enabled: false,
            subscription_tier: None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.link_limit == UNLIMITED_LINKS
    }

    /// Effective tier; a missing tier is the free plan.
    pub fn tier(&self) -> SubscriptionTier {
        self.subscription_tier.unwrap_or(SubscriptionTier::Free)
    }
}

impl Default for SubscriptionLimits {
    fn default() -> Self {
        Self::free()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_parse() {
        assert_eq!("Premium".parse::<SubscriptionTier>(), Ok(SubscriptionTier::Premium));
        assert_eq!(" enterprise ".parse::<SubscriptionTier>(), Ok(SubscriptionTier::Enterprise));
        assert!("gold".parse::<SubscriptionTier>().is_err());
    }

    #[test]
    fn test_free_limits() {
        let limits = SubscriptionLimits::free();

        assert_eq!(limits.tier(), SubscriptionTier::Free);
        assert!(!limits.is_unlimited());
        assert!(!limits.link_scheduling_enabled);
    }

    #[test]
    fn test_limits_serialize_camel_case() {
        let limits = SubscriptionLimits {
            link_limit: UNLIMITED_LINKS,
            advanced_analytics_enabled: true,
            link_scheduling_enabled: true,
            subscription_tier: Some(SubscriptionTier::Enterprise),
        };

        assert_eq!(
            serde_json::to_value(&limits).unwrap(),
            json!({
                "linkLimit": -1,
                "advancedAnalyticsEnabled": true,
                "linkSchedulingEnabled": true,
                "subscriptionTier": "enterprise"
            })
        );
    }
}

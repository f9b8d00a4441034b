//! Basic link analytics for one account.

use serde::Serialize;
use uuid::Uuid;

/// A link ranked by clicks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopLink {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub click_count: i64,
}

/// Totals reported by the analytics collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAnalytics {
    pub total_links: i64,
    pub active_links: i64,
    pub total_clicks: i64,
    pub top_performing_links: Vec<TopLink>,
}

impl LinkAnalytics {
    /// Clicks per link rounded to the nearest integer, 0 without links.
    pub fn average_clicks_per_link(&self) -> i64 {
        if self.total_links <= 0 {
            return 0;
        }
        (2 * self.total_clicks + self.total_links) / (2 * self.total_links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analytics(total_links: i64, total_clicks: i64) -> LinkAnalytics {
        LinkAnalytics {
            total_links,
            active_links: total_links,
            total_clicks,
            top_performing_links: vec![],
        }
    }

    #[test]
    fn test_average_without_links() {
        assert_eq!(analytics(0, 0).average_clicks_per_link(), 0);
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(analytics(2, 3).average_clicks_per_link(), 2);
        assert_eq!(analytics(3, 4).average_clicks_per_link(), 1);
        assert_eq!(analytics(4, 10).average_clicks_per_link(), 3);
    }
}

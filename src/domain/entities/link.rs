//! Link entity and the typed link form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::nullable::Nullable;

/// A shareable link owned by one account.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: Uuid,
    pub account_id: Uuid,
    pub title: String,
    pub url: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub is_active: bool,
    pub is_scheduled: bool,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link waits for its scheduled activation.
    pub fn is_pending_activation(&self) -> bool {
        self.is_scheduled && !self.is_active && self.scheduled_at.is_some()
    }
}

/// Raw link form as submitted by a user.
///
/// Every text field is a plain string; an empty string means "not filled in".
/// `scheduled_at` accepts RFC 3339 or an HTML `datetime-local` value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkDraft {
    pub title: String,
    pub url: String,
    pub slug: String,
    pub description: String,
    pub icon_url: String,
    pub is_active: bool,
    pub is_scheduled: bool,
    pub scheduled_at: String,
}

impl Default for LinkDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            slug: String::new(),
            description: String::new(),
            icon_url: String::new(),
            is_active: true,
            is_scheduled: false,
            scheduled_at: String::new(),
        }
    }
}

impl LinkDraft {
    /// Returns true if the form actually asks for a schedule.
    ///
    /// A checked "scheduled" box with an empty timestamp does not count.
    pub fn requests_schedule(&self) -> bool {
        self.is_scheduled && !self.scheduled_at.trim().is_empty()
    }
}

impl From<&Link> for LinkDraft {
    /// Prefills an edit form from a stored link.
    fn from(link: &Link) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            slug: link.slug.clone().unwrap_or_default(),
            description: link.description.clone().unwrap_or_default(),
            icon_url: link.icon_url.clone().unwrap_or_default(),
            is_active: link.is_active,
            is_scheduled: link.is_scheduled,
            scheduled_at: link
                .scheduled_at
                .map(format_schedule)
                .unwrap_or_default(),
        }
    }
}

impl From<&LinkRecord> for LinkDraft {
    fn from(record: &LinkRecord) -> Self {
        Self {
            title: record.title.clone(),
            url: record.url.clone(),
            slug: record.slug.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            icon_url: record.icon_url.clone().unwrap_or_default(),
            is_active: record.is_active,
            is_scheduled: record.is_scheduled,
            scheduled_at: record
                .scheduled_at
                .as_option()
                .copied()
                .map(format_schedule)
                .unwrap_or_default(),
        }
    }
}

/// Renders a schedule timestamp the way a `datetime-local` input shows it.
///
/// Minute-precision values use `YYYY-MM-DDTHH:MM`; anything finer falls back
/// to RFC 3339 so nothing is lost on a round trip.
pub fn format_schedule(at: DateTime<Utc>) -> String {
    use chrono::Timelike;

    if at.second() == 0 && at.nanosecond() == 0 {
        at.format("%Y-%m-%dT%H:%M").to_string()
    } else {
        at.to_rfc3339()
    }
}

/// Persistence-ready link produced by the link normalizer.
///
/// `scheduled_at` is [`Nullable::Absent`] on an unscheduled create and
/// [`Nullable::Null`] on an unscheduled update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRecord {
    pub title: String,
    pub url: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    pub is_active: bool,
    pub is_scheduled: bool,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub scheduled_at: Nullable<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_link() -> Link {
        Link {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            title: "Portfolio".to_string(),
            url: "https://example.com".to_string(),
            slug: Some("portfolio".to_string()),
            description: None,
            icon_url: None,
            is_active: false,
            is_scheduled: true,
            scheduled_at: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            click_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_scheduled_link_is_pending() {
        let link = create_test_link();
        assert!(link.is_pending_activation());
    }

    #[test]
    fn test_active_link_is_not_pending() {
        let mut link = create_test_link();
        link.is_active = true;
        assert!(!link.is_pending_activation());

        link.is_active = false;
        link.scheduled_at = None;
        assert!(!link.is_pending_activation());
    }

    #[test]
    fn test_draft_defaults_to_active() {
        let draft = LinkDraft::default();
        assert!(draft.is_active);
        assert!(!draft.is_scheduled);
    }

    #[test]
    fn test_requests_schedule_needs_timestamp() {
        let draft = LinkDraft {
            is_scheduled: true,
            scheduled_at: "  ".to_string(),
            ..LinkDraft::default()
        };
        assert!(!draft.requests_schedule());
    }

    #[test]
    fn test_draft_from_link_formats_schedule() {
        let draft = LinkDraft::from(&create_test_link());

        assert_eq!(draft.scheduled_at, "2030-01-01T00:00");
        assert_eq!(draft.slug, "portfolio");
        assert_eq!(draft.description, "");
    }

    #[test]
    fn test_format_schedule_keeps_seconds() {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 30).unwrap();
        assert_eq!(format_schedule(at), "2030-01-01T00:00:30+00:00");
    }
}

//! Turns a submitted link form into a persistence-ready record.
//!
//! # Scheduling rules
//!
//! | form                                   | create                               | update                |
//! |----------------------------------------|--------------------------------------|-----------------------|
//! | scheduled, timestamp set               | keep timestamp, `is_active = false`  | keep timestamp        |
//! | not scheduled                          | `scheduled_at` omitted               | `scheduled_at = null` |
//! | scheduled, timestamp empty             | same as not scheduled                | same as not scheduled |
//!
//! The normalizer does not look at plan limits. Callers check
//! [`super::can_create_link`] first and skip persistence when it fails.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::json;
use url::Url;

use crate::domain::entities::{LinkDraft, LinkRecord};
use crate::domain::nullable::Nullable;
use crate::error::AppError;

/// Whether the form creates a new link or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update,
}

/// Reasons a link form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkDraftError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Only HTTP and HTTPS links are allowed")]
    UnsupportedScheme,

    #[error("Invalid schedule time: {0}")]
    InvalidScheduledAt(String),

    #[error("Scheduled time must not be in the past")]
    ScheduledInPast,
}

impl From<LinkDraftError> for AppError {
    fn from(e: LinkDraftError) -> Self {
        let field = match e {
            LinkDraftError::EmptyTitle => "title",
            LinkDraftError::InvalidUrl(_) | LinkDraftError::UnsupportedScheme => "url",
            LinkDraftError::InvalidScheduledAt(_) | LinkDraftError::ScheduledInPast => {
                "scheduled_at"
            }
        };
        AppError::bad_request(e.to_string(), json!({ "field": field }))
    }
}

/// Normalizes a link form for the given mode.
///
/// `now` is only used on create, where a schedule in the past is rejected.
///
/// # Errors
///
/// Returns [`LinkDraftError`] for an empty title, a non-HTTP(S) URL, or an
/// unparseable or past schedule.
pub fn normalize_link(
    draft: &LinkDraft,
    mode: SubmitMode,
    now: DateTime<Utc>,
) -> Result<LinkRecord, LinkDraftError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(LinkDraftError::EmptyTitle);
    }

    let url = draft.url.trim();
    let parsed = Url::parse(url).map_err(|e| LinkDraftError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LinkDraftError::UnsupportedScheme);
    }

    let schedule = if draft.requests_schedule() {
        Some(parse_schedule(&draft.scheduled_at)?)
    } else {
        None
    };

    let (is_active, is_scheduled, scheduled_at) = match (schedule, mode) {
        (Some(at), SubmitMode::Create) => {
            if at < now {
                return Err(LinkDraftError::ScheduledInPast);
            }
            (false, true, Nullable::Value(at))
        }
        (Some(at), SubmitMode::Update) => (draft.is_active, true, Nullable::Value(at)),
        (None, SubmitMode::Create) => (draft.is_active, false, Nullable::Absent),
        (None, SubmitMode::Update) => (draft.is_active, false, Nullable::Null),
    };

    Ok(LinkRecord {
        title: title.to_string(),
        url: url.to_string(),
        slug: non_empty(&draft.slug),
        description: non_empty(&draft.description),
        icon_url: non_empty(&draft.icon_url),
        is_active,
        is_scheduled,
        scheduled_at,
    })
}

/// Parses RFC 3339 or a `datetime-local` value (`YYYY-MM-DDTHH:MM[:SS]`, UTC).
pub fn parse_schedule(input: &str) -> Result<DateTime<Utc>, LinkDraftError> {
    let input = input.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(input) {
        return Ok(at.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| LinkDraftError::InvalidScheduledAt(input.to_string()))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

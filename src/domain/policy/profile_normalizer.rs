//! Turns a submitted profile form into a persistence-ready record.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::{ProfileDraft, ProfileRecord};

/// Everything a custom profile URL may not contain.
static CUSTOM_URL_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\-_]").expect("static pattern"));

/// Normalizes a profile form.
///
/// - `website` gets an `https://` prefix when it has no HTTP(S) scheme
/// - `custom_url` is lowercased and reduced to `[a-z0-9-_]`
/// - `full_name`, `username` and `bio` are trimmed
/// - empty results become `None`; `avatar_url` is passed through
pub fn normalize_profile(draft: &ProfileDraft) -> ProfileRecord {
    ProfileRecord {
        full_name: trimmed(&draft.full_name),
        username: trimmed(&draft.username),
        bio: trimmed(&draft.bio),
        website: normalize_website(&draft.website),
        custom_url: normalize_custom_url(&draft.custom_url),
        avatar_url: draft.avatar_url.clone(),
    }
}

/// Trims a website and makes its scheme explicit.
pub fn normalize_website(input: &str) -> Option<String> {
    let website = input.trim();
    if website.is_empty() {
        return None;
    }
    if website.starts_with("http://") || website.starts_with("https://") {
        Some(website.to_string())
    } else {
        Some(format!("https://{website}"))
    }
}

/// Lowercases a custom URL and strips every character outside `[a-z0-9-_]`.
pub fn normalize_custom_url(input: &str) -> Option<String> {
    let lowered = input.trim().to_lowercase();
    let cleaned = CUSTOM_URL_STRIP.replace_all(&lowered, "");
    (!cleaned.is_empty()).then(|| cleaned.into_owned())
}

/// Avatar fallback: initials of the first two words, `"U"` when unnamed.
pub fn initials(full_name: &str) -> String {
    let initials: String = full_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "U".to_string()
    } else {
        initials
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

//! Export file naming
//!
//! Names are cosmetic: `script-<topic-slug>-<date>.json` for one record and
//! `script-history-<date>.json` for the whole history.

use crate::record::ContentRecord;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

const MAX_SLUG_LEN: usize = 40;

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"))
}

/// Turns a topic into a filename-safe slug
///
/// # Examples
///
/// ```
/// use clipscribe::storage::export::slugify;
///
/// assert_eq!(slugify("Morning Coffee, 3 ways!"), "morning-coffee-3-ways");
/// assert_eq!(slugify("???"), "untitled");
/// ```
pub fn slugify(topic: &str) -> String {
    let lowered = topic.to_lowercase();
    let collapsed = non_alnum().replace_all(&lowered, "-");
    let mut slug: String = collapsed.trim_matches('-').chars().take(MAX_SLUG_LEN).collect();
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Filename for a single exported record
pub fn record_filename(record: &ContentRecord, now: DateTime<Utc>) -> String {
    format!(
        "script-{}-{}.json",
        slugify(&record.topic),
        now.format("%Y-%m-%d")
    )
}

/// Filename for an export of the whole history
pub fn history_filename(now: DateTime<Utc>) -> String {
    format!("script-history-{}.json", now.format("%Y-%m-%d"))
}

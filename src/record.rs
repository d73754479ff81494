//! Content record model
//!
//! A [`ContentRecord`] is one generated script plus the topic, language and
//! creation instant it was produced for. This module owns the validity and
//! duplicate rules; it has no state and no side effects.

use crate::error::{ClipscribeError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names in the order they are validated
const FIELDS: [&str; 4] = ["topic", "language", "content", "date"];

/// A persisted, exchangeable generation result
///
/// `date` keeps the exact string it was created or imported with, so a record
/// exported and imported again is byte-identical.
///
/// # Examples
///
/// ```
/// use clipscribe::record::ContentRecord;
///
/// let record = ContentRecord {
///     topic: "coffee".to_string(),
///     language: "English".to_string(),
///     content: "Open on a steaming cup...".to_string(),
///     date: "2024-01-01T00:00:00Z".to_string(),
/// };
/// assert!(record.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// User-supplied subject
    pub topic: String,
    /// Output language, opaque to the store
    pub language: String,
    /// Generated script text
    pub content: String,
    /// ISO-8601 creation instant
    pub date: String,
}

impl ContentRecord {
    /// Creates a record stamped with `date`
    ///
    /// The timestamp is rendered as RFC 3339 UTC with millisecond precision
    /// (`2024-01-01T00:00:00.000Z`).
    pub fn new(
        topic: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            topic: topic.into(),
            language: language.into(),
            content: content.into(),
            date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Checks the record invariants
    ///
    /// # Errors
    ///
    /// Returns [`ClipscribeError::InvalidRecord`] naming the first empty field,
    /// or `date` when it is not a valid timestamp.
    pub fn validate(&self) -> Result<()> {
        let values = [&self.topic, &self.language, &self.content, &self.date];
        for (field, value) in FIELDS.iter().zip(values) {
            if value.trim().is_empty() {
                return Err(ClipscribeError::invalid_record(*field, "is empty").into());
            }
        }

        if parse_timestamp(&self.date).is_none() {
            return Err(ClipscribeError::invalid_record(
                "date",
                format!("is not a valid timestamp: {}", self.date),
            )
            .into());
        }

        Ok(())
    }

    /// Parsed creation instant, if the date is valid
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    /// Returns true when `other` has the same topic, language and content
    pub fn is_duplicate_of(&self, other: &ContentRecord) -> bool {
        is_duplicate_of(self, other)
    }
}

/// Duplicate rule: equal `(topic, language, content)`, date ignored
pub fn is_duplicate_of(a: &ContentRecord, b: &ContentRecord) -> bool {
    a.topic == b.topic && a.language == b.language && a.content == b.content
}

/// Validates an arbitrary JSON value as a record
///
/// Extra keys are ignored. Every one of the four fields must be present, be a
/// string, and be non-blank; `date` must parse as a timestamp.
///
/// # Errors
///
/// Returns [`ClipscribeError::InvalidRecord`] naming the offending field.
///
/// # Examples
///
/// ```
/// use clipscribe::record::validate_candidate;
/// use serde_json::json;
///
/// let ok = validate_candidate(&json!({
///     "topic": "coffee",
///     "language": "English",
///     "content": "...",
///     "date": "2024-01-01T00:00:00Z"
/// }));
/// assert!(ok.is_ok());
///
/// let missing = validate_candidate(&json!({"topic": "coffee"}));
/// assert!(missing.is_err());
/// ```
pub fn validate_candidate(candidate: &Value) -> Result<ContentRecord> {
    let object = candidate.as_object().ok_or_else(|| {
        ClipscribeError::invalid_record(
            "record",
            format!("expected an object, got {}", kind_of(candidate)),
        )
    })?;

    let string_field = |field: &str| -> Result<String> {
        match object.get(field) {
            None | Some(Value::Null) => {
                Err(ClipscribeError::invalid_record(field, "is missing").into())
            }
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(ClipscribeError::invalid_record(
                field,
                format!("must be a string, got {}", kind_of(other)),
            )
            .into()),
        }
    };

    let record = ContentRecord {
        topic: string_field("topic")?,
        language: string_field("language")?,
        content: string_field("content")?,
        date: string_field("date")?,
    };
    record.validate()?;
    Ok(record)
}

/// Parses the timestamp formats accepted in a record's `date`
///
/// RFC 3339 is the canonical form; offset-less date-times are read as UTC and
/// a bare date as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Generation session
//!
//! Runs one request/response cycle: checks the credential, calls the
//! provider once, normalizes the response into script text and stamps a
//! [`ContentRecord`]. Storing the record is left to the caller.
//!
//! Callers must not start a second `run` while one is in flight for the
//! same session; nothing here guards against it.

use crate::credentials::CredentialSource;
use crate::error::{ClipscribeError, Result};
use crate::providers::{ScriptProvider, ScriptRequest};
use crate::record::ContentRecord;
use chrono::Utc;
use serde_json::Value;

/// Pulls script text out of one known response shape
pub type ContentExtractor = fn(&Value) -> Option<&str>;

/// Known response shapes, tried in order; the first match wins
pub const RESPONSE_EXTRACTORS: &[(&str, ContentExtractor)] = &[
    ("choices[0].message.content", chat_message_content),
    ("choices[0].text", completion_text),
    ("output.content", output_content),
];

fn chat_message_content(response: &Value) -> Option<&str> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
}

fn completion_text(response: &Value) -> Option<&str> {
    response.pointer("/choices/0/text").and_then(Value::as_str)
}

fn output_content(response: &Value) -> Option<&str> {
    response.pointer("/output/content").and_then(Value::as_str)
}

/// Extracts script text from a raw provider response
///
/// Blank strings do not count as a match.
///
/// # Errors
///
/// Returns [`ClipscribeError::UnrecognizedResponseShape`] carrying the whole
/// payload when no extractor matches.
///
/// # Examples
///
/// ```
/// use clipscribe::session::extract_content;
/// use serde_json::json;
///
/// let response = json!({"choices": [{"text": "Hook: ..."}]});
/// assert_eq!(extract_content(&response).unwrap(), "Hook: ...");
/// ```
pub fn extract_content(response: &Value) -> Result<String> {
    RESPONSE_EXTRACTORS
        .iter()
        .find_map(|(shape, extract)| {
            extract(response)
                .filter(|content| !content.trim().is_empty())
                .map(|content| {
                    tracing::debug!(shape = *shape, "Matched response shape");
                    content.to_string()
                })
        })
        .ok_or_else(|| ClipscribeError::UnrecognizedResponseShape(response.clone()).into())
}

/// One generation surface bound to a credential holder
pub struct GenerationSession<'a> {
    credentials: &'a dyn CredentialSource,
}

impl<'a> GenerationSession<'a> {
    /// Create a session that reads its API key from `credentials`
    pub fn new(credentials: &'a dyn CredentialSource) -> Self {
        Self { credentials }
    }

    /// Generate a script for `topic` in `language`
    ///
    /// Exactly one provider request is made, and none at all when no API key
    /// is configured.
    ///
    /// # Errors
    ///
    /// - [`ClipscribeError::MissingCredential`] when no API key is configured
    /// - [`ClipscribeError::RequestFailed`] as reported by the provider
    /// - [`ClipscribeError::UnrecognizedResponseShape`] when no known shape matches
    /// - [`ClipscribeError::InvalidRecord`] for a blank topic or language
    pub async fn run(
        &self,
        topic: &str,
        language: &str,
        provider: &dyn ScriptProvider,
    ) -> Result<ContentRecord> {
        let api_key = self.credentials.api_key()?.ok_or_else(|| {
            ClipscribeError::MissingCredential(
                "no API key configured; run `clipscribe auth set`".to_string(),
            )
        })?;

        let request = ScriptRequest::new(topic.trim(), language.trim());
        if request.topic.is_empty() {
            return Err(ClipscribeError::invalid_record("topic", "is empty").into());
        }
        if request.language.is_empty() {
            return Err(ClipscribeError::invalid_record("language", "is empty").into());
        }

        tracing::info!(topic = %request.topic, language = %request.language, "Generating script");
        let response = provider.generate(&request, &api_key).await?;
        let content = extract_content(&response)?;

        let record = ContentRecord::new(request.topic, request.language, content, Utc::now());
        record.validate()?;
        Ok(record)
    }
}

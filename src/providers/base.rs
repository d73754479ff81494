//! Base provider trait and common request types
//!
//! A provider performs the single network call behind a generation. It
//! returns the provider's raw JSON response; turning that into script text is
//! the generation session's job.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Chat message sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use clipscribe::providers::Message;
    ///
    /// let msg = Message::system("You write scripts");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// Subject of the script
    pub topic: String,
    /// Language the script must be written in
    pub language: String,
}

impl ScriptRequest {
    /// Creates a request for `topic` in `language`
    pub fn new(topic: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            language: language.into(),
        }
    }

    /// The system and user messages for this request
    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(crate::prompts::build_system_prompt(&self.language)),
            Message::user(crate::prompts::build_user_prompt(
                &self.topic,
                &self.language,
            )),
        ]
    }
}

/// Generation capability
///
/// Implementations perform exactly one request per call and never retry.
///
/// # Examples
///
/// ```
/// use clipscribe::providers::{ScriptProvider, ScriptRequest};
/// use clipscribe::error::Result;
/// use async_trait::async_trait;
///
/// struct Canned;
///
/// #[async_trait]
/// impl ScriptProvider for Canned {
///     async fn generate(&self, _request: &ScriptRequest, _api_key: &str) -> Result<serde_json::Value> {
///         Ok(serde_json::json!({"output": {"content": "A script"}}))
///     }
/// }
/// ```
#[async_trait]
pub trait ScriptProvider: Send + Sync {
    /// Sends `request` authenticated with `api_key` and returns the raw response
    ///
    /// # Errors
    ///
    /// Returns `RequestFailed` for transport failures, timeouts and
    /// non-success statuses, and `UnrecognizedResponseShape` when the body is
    /// not JSON.
    async fn generate(&self, request: &ScriptRequest, api_key: &str) -> Result<serde_json::Value>;
}

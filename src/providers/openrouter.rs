//! OpenRouter provider implementation for Clipscribe
//!
//! Sends one chat completion request to an OpenAI-compatible endpoint
//! (`{api_base}/chat/completions`) and hands back the response body as JSON.

use crate::config::ProviderConfig;
use crate::error::{ClipscribeError, Result};
use crate::providers::{Message, ScriptProvider, ScriptRequest};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Longest body excerpt carried in a `RequestFailed` message
const ERROR_BODY_LIMIT: usize = 500;

/// Chat completions provider
///
/// # Examples
///
/// ```
/// use clipscribe::config::ProviderConfig;
/// use clipscribe::providers::OpenRouterProvider;
///
/// let provider = OpenRouterProvider::new(ProviderConfig::default());
/// assert!(provider.is_ok());
/// ```
pub struct OpenRouterProvider {
    client: Client,
    config: ProviderConfig,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
}

impl OpenRouterProvider {
    /// Create a new provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("clipscribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClipscribeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized OpenRouter provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Configured model identifier
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ScriptProvider for OpenRouterProvider {
    async fn generate(&self, request: &ScriptRequest, api_key: &str) -> Result<serde_json::Value> {
        let body = CompletionRequest {
            model: &self.config.model,
            messages: request.messages(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model = %self.config.model,
            topic = %request.topic,
            language = %request.language,
            "Sending generation request"
        );

        let mut builder = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body);
        if let Some(referer) = &self.config.referer {
            builder = builder.header("HTTP-Referer", referer);
        }

        let response = builder.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                format!("request timed out after {}s", self.config.timeout_seconds)
            } else {
                format!("request could not be sent: {}", e)
            };
            tracing::error!("Generation request failed: {}", reason);
            ClipscribeError::RequestFailed(reason)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ClipscribeError::RequestFailed(format!("failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            let excerpt: String = text.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::error!("Provider returned error {}: {}", status, excerpt);
            return Err(ClipscribeError::RequestFailed(format!(
                "provider returned {}: {}",
                status, excerpt
            ))
            .into());
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("Response body is not JSON: {}", e);
            ClipscribeError::UnrecognizedResponseShape(serde_json::Value::String(text)).into()
        })
    }
}

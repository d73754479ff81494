//! Error types for Clipscribe
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Clipscribe operations
///
/// Covers record validation, history import and persistence, the generation
/// request cycle, and the ambient configuration/IO failures around them.
#[derive(Error, Debug)]
pub enum ClipscribeError {
    /// A record is missing a field, has an empty field, or has an unparsable date
    #[error("Invalid record: field `{field}` {reason}")]
    InvalidRecord {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Import input has the wrong top-level shape or contains nothing usable
    #[error("Invalid import format: {0}")]
    InvalidImportFormat(String),

    /// Persisted history could not be read and was reset to empty
    #[error("Corrupt persistent state: {0}")]
    CorruptPersistentState(String),

    /// No API key is configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The generation request failed (non-success status, transport error, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with a payload none of the known shapes match
    #[error("Unrecognized response shape: {0}")]
    UnrecognizedResponseShape(serde_json::Value),

    /// No history entry at the requested position (1-based)
    #[error("No history entry at position {0}")]
    HistoryEntryNotFound(usize),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// History storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

impl ClipscribeError {
    /// Shorthand for an [`ClipscribeError::InvalidRecord`]
    pub fn invalid_record(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Clipscribe operations
///
/// Uses `anyhow::Error` so context can be attached freely; the typed
/// [`ClipscribeError`] is recovered with `downcast_ref` where it matters.
pub type Result<T> = anyhow::Result<T>;

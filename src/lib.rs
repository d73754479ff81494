//! Clipscribe - short-video script generator library
//!
//! This library generates short-video scripts through an AI provider and
//! keeps a durable, de-duplicated history of the results that can be
//! browsed, exported and re-imported.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `record`: The persisted record type and its validity/duplicate rules
//! - `storage`: History store, persistence backends and export naming
//! - `session`: One generation cycle and response normalization
//! - `providers`: Generation capability abstraction and OpenRouter client
//! - `credentials`: API key holder (environment and OS keyring)
//! - `prompts`: Prompt text sent to the provider
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line surface
//!
//! # Example
//!
//! ```
//! use clipscribe::record::ContentRecord;
//! use clipscribe::storage::{HistoryStore, MemoryKeyValueStore};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut history = HistoryStore::load(MemoryKeyValueStore::new())?;
//! history.add(ContentRecord {
//!     topic: "coffee".to_string(),
//!     language: "English".to_string(),
//!     content: "Open on a steaming cup...".to_string(),
//!     date: "2024-01-01T00:00:00Z".to_string(),
//! })?;
//!
//! let exported = history.export_all()?;
//! let mut copy = HistoryStore::load(MemoryKeyValueStore::new())?;
//! let result = copy.import_json(&exported)?;
//! assert_eq!(result.added, 1);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod record;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use error::{ClipscribeError, Result};
pub use record::ContentRecord;
pub use session::GenerationSession;
pub use storage::{HistoryStore, ImportResult};

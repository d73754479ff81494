//! Provider module for Clipscribe
//!
//! This module contains the generation capability abstraction and its
//! OpenRouter implementation.

pub mod base;
pub mod openrouter;

pub use base::{Message, ScriptProvider, ScriptRequest};
pub use openrouter::OpenRouterProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create the configured provider
///
/// # Errors
///
/// Returns error if provider initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn ScriptProvider>> {
    Ok(Box::new(OpenRouterProvider::new(config.clone())?))
}

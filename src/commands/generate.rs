//! Generation command handler
//!
//! Runs one generation through the configured provider, prints the script
//! and stores it in history.

use crate::commands::open_history;
use crate::config::Config;
use crate::credentials::KeyringCredentialStore;
use crate::error::{ClipscribeError, Result};
use crate::providers::create_provider;
use crate::session::GenerationSession;
use colored::Colorize;

/// Generate a script for `topic` in `language`
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `topic` - Subject of the video
/// * `language` - Language the script is written in
/// * `no_save` - Skip adding the result to history
pub async fn run_generate(
    config: &Config,
    topic: &str,
    language: &str,
    no_save: bool,
) -> Result<()> {
    let mut store = if no_save {
        None
    } else {
        Some(open_history(config)?)
    };

    let credentials = KeyringCredentialStore::new();
    let session = GenerationSession::new(&credentials);
    let provider = create_provider(&config.provider)?;

    let record = match session.run(topic, language, provider.as_ref()).await {
        Ok(record) => record,
        Err(e) => {
            if let Some(ClipscribeError::UnrecognizedResponseShape(payload)) =
                e.downcast_ref::<ClipscribeError>()
            {
                tracing::error!(payload = %payload, "Unexpected API response format");
            }
            return Err(e);
        }
    };

    println!();
    println!(
        "{} {}",
        record.topic.bold(),
        format!("({})", record.language).cyan()
    );
    println!();
    println!("{}", record.content);
    println!();

    if let Some(store) = store.as_mut() {
        if store.add(record)? {
            println!("{}", "Saved to history.".green());
        } else {
            println!("{}", "Identical script already in history; not saved again.".yellow());
        }
    }

    Ok(())
}

/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `generate`: Run one generation and store the result
- `history`: List, show, export, import and clear history
- `auth`: Manage the provider API key

These handlers are thin wrappers around the library components:
session, providers, storage and credentials.
*/

use crate::config::Config;
use crate::error::Result;
use crate::storage::{HistoryStore, SqliteKeyValueStore};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

// Generation command handler
pub mod generate;

// History management commands
pub mod history;

// API key management commands
pub mod auth;

/// Open the history store configured in `config`
///
/// A corrupt-history warning is printed once, in yellow; loading continues
/// with an empty history.
pub fn open_history(config: &Config) -> Result<HistoryStore<SqliteKeyValueStore>> {
    let backend = match &config.history.db_path {
        Some(path) => SqliteKeyValueStore::new_with_path(path.clone())?,
        None => SqliteKeyValueStore::new()?,
    };
    tracing::debug!("Using history database at {}", backend.db_path().display());

    let store = HistoryStore::load(backend)?;
    if let Some(warning) = store.warning() {
        eprintln!(
            "{}",
            format!("Warning: {}. Previous history may have been lost.", warning).yellow()
        );
    }
    Ok(store)
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no
pub fn confirm(question: &str) -> Result<bool> {
    let mut rl = DefaultEditor::new()?;
    match rl.readline(&format!("{} [y/N] ", question)) {
        Ok(answer) => Ok(is_affirmative(&answer)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

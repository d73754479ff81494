//! API key management commands

use crate::cli::AuthCommand;
use crate::credentials::{CredentialSource, KeyringCredentialStore, API_KEY_ENV};
use crate::error::Result;
use colored::Colorize;
use rustyline::DefaultEditor;

/// Handle auth commands
pub fn handle_auth(command: AuthCommand) -> Result<()> {
    let store = KeyringCredentialStore::new();

    match command {
        AuthCommand::Set { key } => {
            let key = match key {
                Some(key) => key,
                None => {
                    let mut rl = DefaultEditor::new()?;
                    rl.readline("API key: ")?
                }
            };
            store.save(&key)?;
            println!("{}", "API key saved to the system keyring.".green());
        }
        AuthCommand::Clear => {
            store.clear()?;
            println!("{}", "API key removed from the system keyring.".green());
        }
        AuthCommand::Status => {
            let from_env = std::env::var(API_KEY_ENV)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false);
            match store.api_key()? {
                Some(key) => println!(
                    "{} {} (from {})",
                    "API key configured:".green(),
                    mask(&key),
                    if from_env { API_KEY_ENV } else { "keyring" }
                ),
                None => println!(
                    "{} run {} or set {}",
                    "No API key configured;".yellow(),
                    "clipscribe auth set".cyan(),
                    API_KEY_ENV
                ),
            }
        }
    }

    Ok(())
}

/// Show only the last four characters of a key
fn mask(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(8), tail)
}

//! Command-line interface definition for Clipscribe
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for generation, history management and credentials.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clipscribe - short-video script generator
///
/// Generates short-video scripts with an AI provider and keeps a
/// de-duplicated local history that can be browsed, exported and imported.
#[derive(Parser, Debug, Clone)]
#[command(name = "clipscribe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the history database path
    #[arg(long)]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Clipscribe
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a script and add it to history
    Generate {
        /// Subject of the video
        #[arg(short, long)]
        topic: String,

        /// Language the script is written in
        #[arg(short, long, default_value = "English")]
        language: String,

        /// Print the script without adding it to history
        #[arg(long)]
        no_save: bool,
    },

    /// Browse, export and import generation history
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Manage the provider API key
    Auth {
        /// Credential subcommand
        #[command(subcommand)]
        command: AuthCommand,
    },
}

/// History subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List stored scripts, newest first
    List,

    /// Print one stored script in full
    Show {
        /// Position as shown by `history list` (1 = newest)
        index: usize,
    },

    /// Export one script or the whole history as JSON
    Export {
        /// Export only the script at this position (1 = newest)
        #[arg(short, long)]
        index: Option<usize>,

        /// Output file (defaults to a dated filename in the current directory)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write the JSON to standard output instead of a file
        #[arg(long)]
        stdout: bool,
    },

    /// Import scripts from a JSON file (one record or an array)
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Delete all stored scripts
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Credential subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Store the API key in the system keyring
    Set {
        /// API key; prompted for when omitted
        #[arg(long)]
        key: Option<String>,
    },

    /// Remove the stored API key
    Clear,

    /// Show whether an API key is configured
    Status,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            storage_path: None,
            command: Commands::History {
                command: HistoryCommand::List,
            },
        }
    }
}

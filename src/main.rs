//! Clipscribe - short-video script generator CLI
//!
#![doc = "Main entry point for the Clipscribe application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clipscribe::cli::{Cli, Commands};
use clipscribe::commands;
use clipscribe::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    config.validate()?;

    match cli.command {
        Commands::Generate {
            topic,
            language,
            no_save,
        } => {
            tracing::info!("Starting generation");
            if no_save {
                tracing::debug!("Result will not be saved to history");
            }
            commands::generate::run_generate(&config, &topic, &language, no_save).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::info!("Starting history command");
            commands::history::handle_history(&config, command)?;
            Ok(())
        }
        Commands::Auth { command } => {
            tracing::info!("Starting auth command");
            commands::auth::handle_auth(command)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so exported JSON on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "clipscribe=debug"
    } else {
        "clipscribe=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

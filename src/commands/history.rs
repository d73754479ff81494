use crate::cli::HistoryCommand;
use crate::commands::{confirm, open_history};
use crate::config::Config;
use crate::error::{ClipscribeError, Result};
use crate::record::ContentRecord;
use crate::storage::export::{history_filename, record_filename};
use crate::storage::{HistoryStore, KeyValueStore};
use chrono::Utc;
use colored::Colorize;
use prettytable::{format, Table};
use std::io::Write;
use std::path::PathBuf;

const PREVIEW_CHARS: usize = 48;

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let mut store = open_history(config)?;

    match command {
        HistoryCommand::List => {
            let records = store.list();

            if records.is_empty() {
                println!("{}", "No scripts in history.".yellow());
                return Ok(());
            }

            println!("\nScript History:");
            build_table(&records).printstd();
            println!();
            println!(
                "Use {} to read a script in full.",
                "clipscribe history show <N>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { index } => {
            let record = entry_at(&store, index)?;
            println!(
                "{} {} {}",
                record.topic.bold(),
                format!("({})", record.language).cyan(),
                display_date(&record).dimmed()
            );
            println!();
            println!("{}", record.content);
        }
        HistoryCommand::Export {
            index,
            output,
            stdout,
        } => {
            let now = Utc::now();
            let (bytes, default_name) = match index {
                Some(index) => {
                    let record = entry_at(&store, index)?;
                    (store.export_one(&record)?, record_filename(&record, now))
                }
                None => (store.export_all()?, history_filename(now)),
            };

            if stdout {
                let mut out = std::io::stdout().lock();
                out.write_all(&bytes)?;
                out.write_all(b"\n")?;
                return Ok(());
            }

            let path = output.unwrap_or_else(|| PathBuf::from(default_name));
            std::fs::write(&path, &bytes)?;
            tracing::info!("Exported history to {}", path.display());
            println!("{}", format!("Exported to {}", path.display()).green());
        }
        HistoryCommand::Import { file } => {
            let bytes = std::fs::read(&file)?;
            let result = store.import_json(&bytes)?;
            println!(
                "{}",
                format!(
                    "Imported {} script(s), skipped {} invalid or duplicate entr{}.",
                    result.added,
                    result.skipped,
                    if result.skipped == 1 { "y" } else { "ies" }
                )
                .green()
            );
        }
        HistoryCommand::Clear { yes } => {
            if store.is_empty() {
                println!("{}", "History is already empty.".yellow());
                return Ok(());
            }
            let question = format!("Delete all {} script(s) from history?", store.len());
            if !yes && !confirm(&question)? {
                println!("Cancelled.");
                return Ok(());
            }
            store.clear()?;
            println!("{}", "History cleared.".green());
        }
    }

    Ok(())
}

/// Record at a 1-based position
fn entry_at<B: KeyValueStore>(store: &HistoryStore<B>, index: usize) -> Result<ContentRecord> {
    index
        .checked_sub(1)
        .and_then(|i| store.get(i))
        .ok_or_else(|| ClipscribeError::HistoryEntryNotFound(index).into())
}

fn build_table(records: &[ContentRecord]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "#".bold(),
        "Date".bold(),
        "Language".bold(),
        "Topic".bold(),
        "Preview".bold()
    ]);

    for (i, record) in records.iter().enumerate() {
        table.add_row(prettytable::row![
            (i + 1).to_string().cyan(),
            display_date(record),
            record.language,
            truncate(&record.topic, 30),
            preview(&record.content)
        ]);
    }

    table
}

fn display_date(record: &ContentRecord) -> String {
    record
        .timestamp()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| record.date.clone())
}

/// First line of the content, shortened
fn preview(content: &str) -> String {
    let first_line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    truncate(first_line, PREVIEW_CHARS)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

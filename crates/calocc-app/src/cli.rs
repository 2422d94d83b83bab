use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calocc_core::config::EngineConfig;
use calocc_rfc::OccurrenceEngine;
use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "calocc")]
#[command(about = "Resolve the occurrences of an iCalendar feed around an instant")]
pub struct Cli {
    /// ICS file to read. Reads stdin when omitted.
    pub file: Option<PathBuf>,

    /// Reference instant (RFC 3339, e.g. "2024-05-06T09:00:00Z"). Defaults to now.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Host timezone (IANA or Windows name). Overrides configuration.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Hours past the reference instant to expand recurrences into.
    #[arg(long)]
    pub lookahead_hours: Option<u32>,

    /// Only print occurrences in progress at the reference instant.
    #[arg(long)]
    pub active: bool,
}

impl Cli {
    /// Layers the command-line overrides onto the configured engine settings.
    #[must_use]
    pub fn engine_config(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(timezone) = &self.timezone {
            config.local_timezone = Some(timezone.clone());
        }
        if let Some(hours) = self.lookahead_hours {
            config.lookahead_hours = hours;
        }
        config
    }
}

/// ## Summary
/// Reads the feed text from `file`, or from stdin when there is none.
///
/// ## Errors
/// Returns an error if the input cannot be read as UTF-8 text.
pub fn read_feed(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read feed from stdin")?;
            Ok(text)
        }
    }
}

/// ## Summary
/// Resolves `feed` and renders the occurrences as a JSON array sorted by start.
///
/// ## Errors
/// Returns an error if the engine cannot be configured or the feed cannot be
/// decoded.
pub fn run(cli: &Cli, config: EngineConfig, feed: &str) -> Result<String> {
    let engine = OccurrenceEngine::from_config(&cli.engine_config(config))?;
    let now = cli.now.unwrap_or_else(Utc::now);

    let mut occurrences = engine.resolve_occurrences(feed, now)?;
    if cli.active {
        occurrences.retain(|occurrence| occurrence.is_active_at(now));
    }
    occurrences.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.summary.cmp(&b.summary)));

    tracing::info!(count = occurrences.len(), now = %now, "Resolved feed");

    Ok(serde_json::to_string_pretty(&occurrences)?)
}

//! Common utilities for tools

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::generate::GeneratedTaps;

/// Output format for generated taps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One amplitude per line
    #[default]
    Text,
    /// `offset,amplitude` rows with a header
    Csv,
    Json,
}

impl OutputFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("txt") => Some(OutputFormat::Text),
            Some("csv") => Some(OutputFormat::Csv),
            Some("json") => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Initialize logging: WARN by default, INFO when verbose, DEBUG when debugging
pub fn init_logging(verbose: bool, debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a comma or whitespace separated list of sample offsets
pub fn parse_offsets(s: &str) -> Result<Vec<f64>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("Invalid sample offset: {:?}", token))
        })
        .collect()
}

/// Render generated taps in the requested format
pub fn format_taps(generated: &GeneratedTaps, format: OutputFormat) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Text => {
            for tap in &generated.taps {
                writeln!(out, "{}", tap)?;
            }
        }
        OutputFormat::Csv => {
            writeln!(out, "offset,amplitude")?;
            for (offset, tap) in generated.offsets.iter().zip(&generated.taps) {
                writeln!(out, "{},{}", offset, tap)?;
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(generated)?;
            out.push('\n');
        }
    }

    Ok(out)
}

/// Write to a file, or to stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            info!("Wrote {} bytes to {:?}", content.len(), path);
        }
        None => print!("{}", content),
    }

    Ok(())
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("Failed to parse config file: {}", e),
    }
}

/// Save configuration to file
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)?;
    Ok(())
}

//! Configuration management for pulsekit tools

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use pulsekit_core::prelude::*;

use crate::common::{parse_offsets, OutputFormat};

/// Kernel selected by a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Sinc,
    #[value(alias = "rcosine")]
    RaisedCosine,
    #[value(alias = "sqrtrcosine", alias = "rrc")]
    RootRaisedCosine,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Sinc => "sinc",
            ShapeKind::RaisedCosine => "rcosine",
            ShapeKind::RootRaisedCosine => "sqrtrcosine",
        }
    }
}

/// Tap generation settings, loadable from TOML or JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub shape: ShapeKind,
    pub rolloff: f64,
    pub samples_per_symbol: f64,
    pub span_symbols: usize,
    /// Explicit sample offsets; overrides the symbol span when present
    pub offsets: Option<Vec<f64>>,
    pub format: OutputFormat,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            shape: ShapeKind::RootRaisedCosine,
            rolloff: 0.35,
            samples_per_symbol: 4.0,
            span_symbols: 8,
            offsets: None,
            format: OutputFormat::Text,
        }
    }
}

impl PulseConfig {
    /// Load configuration from a TOML or JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        crate::common::load_config(path)
            .with_context(|| format!("Failed to load config file: {:?}", path))
    }

    /// Save configuration, format chosen by file extension
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        crate::common::save_config(self, path)
            .with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Validated kernel described by this configuration
    pub fn pulse_shape(&self) -> Result<PulseShape> {
        let shape = match self.shape {
            ShapeKind::Sinc => PulseShape::Sinc,
            ShapeKind::RaisedCosine => PulseShape::RaisedCosine {
                rolloff: RolloffFactor::new(self.rolloff)?,
                samples_per_symbol: SamplesPerSymbol::new(self.samples_per_symbol)?,
            },
            ShapeKind::RootRaisedCosine => PulseShape::RootRaisedCosine {
                rolloff: RolloffFactor::new(self.rolloff)?,
                samples_per_symbol: SamplesPerSymbol::new(self.samples_per_symbol)?,
            },
        };

        Ok(shape)
    }

    /// Sample offsets to evaluate: the explicit list, or the symmetric span
    pub fn offsets(&self) -> Result<SampleVector> {
        if let Some(offsets) = &self.offsets {
            return Ok(SampleVector::from(offsets.clone()));
        }

        let sps = SamplesPerSymbol::new(self.samples_per_symbol)?;
        Ok(SampleVector::symbol_span(self.span_symbols, sps)?)
    }
}

/// Kernel parameters from the command line; flags override values from
/// `--config`
#[derive(Debug, Clone, Default, Args)]
pub struct KernelArgs {
    /// TOML or JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sample offsets, comma separated (overrides --span)
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    pub offsets: Option<String>,

    /// Rolloff factor B in [0, 1]
    #[arg(short, long)]
    pub rolloff: Option<f64>,

    /// Samples per symbol Ns
    #[arg(short = 'n', long)]
    pub sps: Option<f64>,

    /// Filter span in symbols
    #[arg(short, long)]
    pub span: Option<usize>,

    /// Output format (defaults to the output file extension, then the config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl KernelArgs {
    /// Merge the config file (or defaults) with the flags given
    pub fn to_config(&self, shape: Option<ShapeKind>) -> Result<PulseConfig> {
        let mut config = match &self.config {
            Some(path) => PulseConfig::from_file(path)?,
            None => PulseConfig::default(),
        };

        if let Some(shape) = shape {
            config.shape = shape;
        }
        if let Some(offsets) = &self.offsets {
            config.offsets = Some(parse_offsets(offsets)?);
        }
        if let Some(rolloff) = self.rolloff {
            config.rolloff = rolloff;
        }
        if let Some(sps) = self.sps {
            config.samples_per_symbol = sps;
        }
        if let Some(span) = self.span {
            config.span_symbols = span;
        }
        if let Some(format) = self
            .format
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
        {
            config.format = format;
        }

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}

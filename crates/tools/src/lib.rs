//! pulsekit tools library

pub mod analyze;
pub mod common;
pub mod config;
pub mod generate;

pub use analyze::ResponseSummary;
pub use common::{format_taps, init_logging, parse_offsets, write_output, OutputFormat};
pub use config::{KernelArgs, PulseConfig, ShapeKind};
pub use generate::{generate, GeneratedTaps};

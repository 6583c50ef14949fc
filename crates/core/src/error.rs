//! Error types for pulsekit core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid rolloff factor: {value} (must be within [0, 1])")]
    InvalidRolloff { value: f64 },

    #[error("Invalid samples per symbol: {value} (must be finite and at least f64::MIN_POSITIVE)")]
    InvalidSamplesPerSymbol { value: f64 },

    #[error("Parameter `{name}` has length {actual}, expected {expected}")]
    ParameterLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid symbol span: {msg}")]
    InvalidSpan { msg: String },

    #[error("Invalid FFT size {size} for {taps} taps (must be a power of 2 no smaller than the tap count)")]
    InvalidFftSize { size: usize, taps: usize },
}

impl CoreError {
    /// Whether this error is a caller configuration error, raised before any
    /// computation starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidRolloff { .. }
                | CoreError::InvalidSamplesPerSymbol { .. }
                | CoreError::ParameterLength { .. }
                | CoreError::InvalidSpan { .. }
        )
    }
}

/// Result type for pulsekit core operations
pub type Result<T> = std::result::Result<T, CoreError>;

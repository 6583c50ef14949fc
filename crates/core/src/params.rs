//! Validated filter parameters

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Excess bandwidth of the raised cosine family, `0 <= B <= 1`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RolloffFactor(f64);

impl RolloffFactor {
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            warn!("Rejecting rolloff factor {}", value);
            return Err(CoreError::InvalidRolloff { value });
        }

        Ok(Self(value))
    }

    /// Validate a broadcast parameter: exactly one filter-wide value.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        Self::new(single_value("rolloff", values)?)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RolloffFactor {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<RolloffFactor> for f64 {
    fn from(rolloff: RolloffFactor) -> Self {
        rolloff.0
    }
}

/// Oversampling factor: number of samples per symbol period, `Ns > 0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SamplesPerSymbol(f64);

impl SamplesPerSymbol {
    /// `value` must be finite and at least `f64::MIN_POSITIVE`, so that the
    /// `1 / Ns` tap scaling cannot overflow.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < f64::MIN_POSITIVE {
            warn!("Rejecting samples per symbol {}", value);
            return Err(CoreError::InvalidSamplesPerSymbol { value });
        }

        Ok(Self(value))
    }

    /// Validate a broadcast parameter: exactly one filter-wide value.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        Self::new(single_value("samples_per_symbol", values)?)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SamplesPerSymbol {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SamplesPerSymbol> for f64 {
    fn from(sps: SamplesPerSymbol) -> Self {
        sps.0
    }
}

// Per-element parameter vectors are not supported, even when they match
// the input length.
fn single_value(name: &'static str, values: &[f64]) -> Result<f64> {
    match values {
        [value] => Ok(*value),
        _ => {
            warn!("Parameter `{}` must be a single value, got {}", name, values.len());
            Err(CoreError::ParameterLength {
                name,
                expected: 1,
                actual: values.len(),
            })
        }
    }
}

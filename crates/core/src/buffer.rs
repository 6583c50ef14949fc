//! Sample vectors: sample offsets in, filter taps out

use crate::params::SamplesPerSymbol;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Largest sample count `span * Ns` accepted by [`SampleVector::symbol_span`]
pub const MAX_SPAN_SAMPLES: usize = 1 << 24;

/// Ordered sequence of real samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleVector {
    data: Vec<f64>,
}

impl SampleVector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    /// Symmetric offset axis covering `span_symbols` symbol periods.
    ///
    /// Produces the integer offsets `-span*Ns/2 ..= span*Ns/2`, i.e.
    /// `span*Ns + 1` samples centred on zero. The total sample count
    /// `span*Ns` must be an even integer no larger than [`MAX_SPAN_SAMPLES`].
    pub fn symbol_span(span_symbols: usize, sps: SamplesPerSymbol) -> Result<Self> {
        if span_symbols == 0 {
            return Err(CoreError::InvalidSpan {
                msg: "span must cover at least one symbol".to_string(),
            });
        }

        let total = span_symbols as f64 * sps.value();
        if total.fract() != 0.0 || total % 2.0 != 0.0 {
            return Err(CoreError::InvalidSpan {
                msg: format!(
                    "{} symbols at {} samples per symbol is not an even number of samples",
                    span_symbols,
                    sps.value()
                ),
            });
        }

        if total > MAX_SPAN_SAMPLES as f64 {
            return Err(CoreError::InvalidSpan {
                msg: format!(
                    "{} symbols at {} samples per symbol exceeds {} samples",
                    span_symbols,
                    sps.value(),
                    MAX_SPAN_SAMPLES
                ),
            });
        }

        let half = (total / 2.0) as i64;
        let data = (-half..=half).map(|n| n as f64).collect();

        Ok(Self { data })
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

impl From<Vec<f64>> for SampleVector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

impl Index<usize> for SampleVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

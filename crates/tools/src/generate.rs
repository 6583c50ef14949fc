//! Tap generation from a pulse configuration

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use pulsekit_core::{rcosine, sinc, sqrtrcosine};

use crate::config::{PulseConfig, ShapeKind};

/// Kernel output paired with the offsets it was evaluated at
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedTaps {
    pub shape: ShapeKind,
    pub offsets: Vec<f64>,
    pub taps: Vec<f64>,
}

/// Evaluate the configured kernel.
///
/// For `sinc` over a symbol span the offsets are divided by the samples per
/// symbol, so the zeros fall on symbol instants. Explicit offsets are passed
/// through unchanged for every kernel.
pub fn generate(config: &PulseConfig) -> Result<GeneratedTaps> {
    let offsets = config.offsets()?.into_inner();
    let rolloff = [config.rolloff];
    let sps = [config.samples_per_symbol];

    let taps = match config.shape {
        ShapeKind::Sinc if config.offsets.is_none() => {
            let positions: Vec<f64> = offsets.iter().map(|x| x / config.samples_per_symbol).collect();
            sinc(&positions)
        }
        ShapeKind::Sinc => sinc(&offsets),
        ShapeKind::RaisedCosine => rcosine(&offsets, &rolloff, &sps)?,
        ShapeKind::RootRaisedCosine => sqrtrcosine(&offsets, &rolloff, &sps)?,
    };

    info!("Generated {} {} taps", taps.len(), config.shape.name());

    Ok(GeneratedTaps {
        shape: config.shape,
        offsets,
        taps,
    })
}

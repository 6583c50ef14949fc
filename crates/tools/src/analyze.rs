//! Frequency-domain summary of generated taps

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use pulsekit_core::prelude::*;

use crate::generate::GeneratedTaps;

/// Analysis results
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSummary {
    pub tap_count: usize,
    pub fft_size: usize,
    pub energy: f64,
    pub peak_amplitude: f64,
    pub dc_gain: f64,
    /// -3 dB point in cycles per sample
    pub cutoff_3db: Option<f64>,
    /// -6 dB point in cycles per sample
    pub cutoff_6db: Option<f64>,
    /// Samples per symbol, used to express cutoffs in cycles per symbol
    pub samples_per_symbol: Option<f64>,
}

impl ResponseSummary {
    /// Analyze generated taps with an FFT of at least `min_fft_size` points
    pub fn analyze(
        generated: &GeneratedTaps,
        samples_per_symbol: Option<SamplesPerSymbol>,
        min_fft_size: usize,
    ) -> Result<Self> {
        let taps = &generated.taps;
        let fft_size = min_fft_size
            .max(taps.len())
            .checked_next_power_of_two()
            .ok_or(CoreError::InvalidFftSize {
                size: min_fft_size,
                taps: taps.len(),
            })?;
        debug!("Analyzing {} taps with {}-point FFT", taps.len(), fft_size);

        let response = FrequencyResponse::compute(taps, fft_size)?;

        Ok(Self {
            tap_count: taps.len(),
            fft_size: response.fft_size(),
            energy: energy(taps),
            peak_amplitude: taps.iter().map(|t| t.abs()).fold(0.0, f64::max),
            dc_gain: response.dc_gain(),
            cutoff_3db: response.cutoff_frequency(3.0103),
            cutoff_6db: response.cutoff_frequency(6.0206),
            samples_per_symbol: samples_per_symbol.map(|sps| sps.value()),
        })
    }

    /// Convert a cycles-per-sample frequency to cycles per symbol
    pub fn per_symbol(&self, frequency: f64) -> Option<f64> {
        self.samples_per_symbol.map(|sps| frequency * sps)
    }
}

impl fmt::Display for ResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Taps:           {}", self.tap_count)?;
        writeln!(f, "FFT size:       {}", self.fft_size)?;
        writeln!(f, "Energy:         {:.6}", self.energy)?;
        writeln!(f, "Peak amplitude: {:.6}", self.peak_amplitude)?;
        writeln!(f, "DC gain:        {:.6}", self.dc_gain)?;

        for (label, cutoff) in [("-3 dB", self.cutoff_3db), ("-6 dB", self.cutoff_6db)] {
            match cutoff {
                Some(freq) => match self.per_symbol(freq) {
                    Some(per_symbol) => writeln!(
                        f,
                        "{} cutoff:   {:.5} cycles/sample ({:.4} cycles/symbol)",
                        label, freq, per_symbol
                    )?,
                    None => writeln!(f, "{} cutoff:   {:.5} cycles/sample", label, freq)?,
                },
                None => writeln!(f, "{} cutoff:   none", label)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PulseConfig, ShapeKind};
    use crate::generate::generate;

    #[test]
    fn test_raised_cosine_summary() {
        let config = PulseConfig {
            shape: ShapeKind::RaisedCosine,
            rolloff: 0.5,
            samples_per_symbol: 8.0,
            span_symbols: 16,
            ..PulseConfig::default()
        };
        let generated = generate(&config).unwrap();
        let sps = config.pulse_shape().unwrap().samples_per_symbol();

        let summary = ResponseSummary::analyze(&generated, sps, 1024).unwrap();
        assert_eq!(summary.tap_count, 129);
        assert_eq!(summary.peak_amplitude, 1.0);

        // RC spectrum falls to half amplitude at half the symbol rate
        let cutoff = summary.cutoff_6db.unwrap();
        let per_symbol = summary.per_symbol(cutoff).unwrap();
        assert!((per_symbol - 0.5).abs() < 0.05);
        assert!(summary.cutoff_3db.unwrap() < cutoff);
    }

    #[test]
    fn test_fft_size_grows_with_taps() {
        let generated = GeneratedTaps {
            shape: ShapeKind::Sinc,
            offsets: vec![0.0; 100],
            taps: vec![0.0; 100],
        };
        let summary = ResponseSummary::analyze(&generated, None, 16).unwrap();
        assert_eq!(summary.fft_size, 128);
        assert_eq!(summary.dc_gain, 0.0);
        assert_eq!(summary.cutoff_3db, None);
        assert_eq!(summary.per_symbol(0.1), None);
    }

    #[test]
    fn test_oversized_fft_rejected() {
        let generated = GeneratedTaps {
            shape: ShapeKind::Sinc,
            offsets: vec![0.0],
            taps: vec![1.0],
        };

        for min_fft_size in [usize::MAX, usize::MAX / 2 + 2, (1 << 24) + 1] {
            let err = ResponseSummary::analyze(&generated, None, min_fft_size).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CoreError>(),
                Some(CoreError::InvalidFftSize { .. })
            ));
        }
    }

    #[test]
    fn test_display() {
        let generated = GeneratedTaps {
            shape: ShapeKind::Sinc,
            offsets: vec![0.0],
            taps: vec![1.0],
        };
        let text = ResponseSummary::analyze(&generated, None, 8).unwrap().to_string();
        assert!(text.contains("Taps:           1"));
        assert!(text.contains("-3 dB cutoff:   none"));
    }
}

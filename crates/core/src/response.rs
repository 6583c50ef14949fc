//! Analysis of generated tap vectors

use crate::{CoreError, Result};
use rustfft::{num_complex::Complex64, FftPlanner};
use tracing::debug;

/// Full linear convolution, `a.len() + b.len() - 1` samples long.
///
/// Returns an empty vector if either input is empty.
pub fn convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut output = vec![0.0; a.len() + b.len() - 1];
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            output[i + j] += ai * bj;
        }
    }

    output
}

/// Sum of squared taps
pub fn energy(taps: &[f64]) -> f64 {
    taps.iter().map(|t| t * t).sum()
}

/// Largest FFT size accepted by [`FrequencyResponse::compute`]
pub const MAX_FFT_SIZE: usize = 1 << 24;

/// Magnitude response of a tap vector over the non-negative frequencies
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    fft_size: usize,
    magnitudes: Vec<f64>,
}

impl FrequencyResponse {
    /// Zero-pad `taps` to `fft_size` and take its magnitude spectrum.
    ///
    /// `fft_size` must be a power of 2, at least `taps.len()` and no larger
    /// than [`MAX_FFT_SIZE`].
    pub fn compute(taps: &[f64], fft_size: usize) -> Result<Self> {
        if fft_size == 0
            || !fft_size.is_power_of_two()
            || fft_size < taps.len()
            || fft_size > MAX_FFT_SIZE
        {
            return Err(CoreError::InvalidFftSize {
                size: fft_size,
                taps: taps.len(),
            });
        }

        let mut buffer = vec![Complex64::new(0.0, 0.0); fft_size];
        for (slot, &tap) in buffer.iter_mut().zip(taps) {
            *slot = Complex64::new(tap, 0.0);
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        fft.process(&mut buffer);

        let magnitudes = buffer[..fft_size / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect();

        debug!("Computed {}-point response of {} taps", fft_size, taps.len());

        Ok(Self {
            fft_size,
            magnitudes,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Magnitudes for bins `0 ..= fft_size / 2`
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Bin frequency in cycles per sample
    pub fn normalized_frequency(&self, bin: usize) -> f64 {
        bin as f64 / self.fft_size as f64
    }

    pub fn dc_gain(&self) -> f64 {
        self.magnitudes[0]
    }

    /// First frequency (cycles per sample) at which the response has fallen
    /// `attenuation_db` below its DC gain.
    pub fn cutoff_frequency(&self, attenuation_db: f64) -> Option<f64> {
        let dc = self.dc_gain();
        if dc == 0.0 {
            return None;
        }

        let threshold = dc * 10f64.powf(-attenuation_db / 20.0);
        self.magnitudes
            .iter()
            .position(|&m| m < threshold)
            .map(|bin| self.normalized_frequency(bin))
    }
}

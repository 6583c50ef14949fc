//! Pulse-shaping kernels: sinc, raised cosine and root raised cosine
//!
//! Inputs are sample offsets `x`; the raised cosine family scales them by the
//! oversampling factor so that `t = x / Ns` is measured in symbol periods.
//! Every kernel maps its input element-wise and preserves the input length.
//!
//! The closed forms have removable singularities. Whenever a denominator
//! comes within [`SINGULARITY_TOLERANCE`] of zero the analytic limit is used
//! instead, so valid parameters never produce `NaN` or infinite taps.

use crate::params::{RolloffFactor, SamplesPerSymbol};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4, PI};
use tracing::debug;

/// Distance from zero below which a denominator is treated as vanishing
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Symbol offsets below this are evaluated at the peak, `t = 0`
pub const PEAK_TOLERANCE: f64 = 1e-12;

/// Symbol offsets at or beyond this (2^52, where every `f64` is an integer)
/// are in the tail and evaluate to `0.0`
pub const TAIL_OFFSET: f64 = 4_503_599_627_370_496.0;

// Rolloffs below the smallest normal f64 have reciprocals that overflow;
// they are evaluated as zero rolloff.
fn negligible_rolloff(rolloff: RolloffFactor) -> bool {
    rolloff.value() < f64::MIN_POSITIVE
}

/// Normalized sinc of a single offset.
///
/// Integer offsets other than zero return exactly `0.0`.
pub fn sinc_at(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }

    if x == x.trunc() {
        return 0.0;
    }

    let px = PI * x;
    px.sin() / px
}

/// Raised cosine impulse response at a single sample offset
pub fn raised_cosine_at(x: f64, rolloff: RolloffFactor, sps: SamplesPerSymbol) -> f64 {
    let t = (x / sps.value()).abs();
    let b = rolloff.value();

    if t < PEAK_TOLERANCE {
        return 1.0;
    }

    if t >= TAIL_OFFSET {
        return 0.0;
    }

    if negligible_rolloff(rolloff) {
        return sinc_at(t);
    }

    let u = 2.0 * b * t;
    if (1.0 - u).abs() < SINGULARITY_TOLERANCE {
        return FRAC_PI_4 * sinc_at(1.0 / (2.0 * b));
    }

    sinc_at(t) * (PI * b * t).cos() / (1.0 - u * u)
}

/// Root raised cosine impulse response at a single sample offset, scaled by
/// `1 / Ns`
pub fn root_raised_cosine_at(x: f64, rolloff: RolloffFactor, sps: SamplesPerSymbol) -> f64 {
    let ns = sps.value();
    let t = (x / ns).abs();
    let b = rolloff.value();

    if t < PEAK_TOLERANCE {
        return (1.0 - b + 4.0 * b / PI) / ns;
    }

    if t >= TAIL_OFFSET {
        return 0.0;
    }

    // No excess bandwidth: the square root of a brick-wall spectrum is the
    // same brick wall.
    if negligible_rolloff(rolloff) {
        return sinc_at(t) / ns;
    }

    let u = 4.0 * b * t;
    if (1.0 - u).abs() < SINGULARITY_TOLERANCE {
        let arg = PI / (4.0 * b);
        let limit = b * FRAC_1_SQRT_2
            * ((1.0 + 2.0 / PI) * arg.sin() + (1.0 - 2.0 / PI) * arg.cos());
        return limit / ns;
    }

    let numerator = (PI * t * (1.0 - b)).sin() + u * (PI * t * (1.0 + b)).cos();
    let denominator = PI * t * (1.0 - u * u);

    numerator / denominator / ns
}

/// Normalized sinc over a vector of sample positions
pub fn sinc(x: &[f64]) -> Vec<f64> {
    debug!("sinc over {} samples", x.len());
    x.iter().map(|&xi| sinc_at(xi)).collect()
}

/// Raised cosine taps at the given sample offsets.
///
/// `rolloff` and `samples_per_symbol` are filter-wide and must each hold
/// exactly one value. Parameters are validated before any tap is computed.
pub fn rcosine(x: &[f64], rolloff: &[f64], samples_per_symbol: &[f64]) -> Result<Vec<f64>> {
    let rolloff = RolloffFactor::from_values(rolloff)?;
    let sps = SamplesPerSymbol::from_values(samples_per_symbol)?;

    Ok(PulseShape::RaisedCosine {
        rolloff,
        samples_per_symbol: sps,
    }
    .evaluate(x))
}

/// Root raised cosine taps at the given sample offsets.
///
/// Same parameter rules as [`rcosine`].
pub fn sqrtrcosine(x: &[f64], rolloff: &[f64], samples_per_symbol: &[f64]) -> Result<Vec<f64>> {
    let rolloff = RolloffFactor::from_values(rolloff)?;
    let sps = SamplesPerSymbol::from_values(samples_per_symbol)?;

    Ok(PulseShape::RootRaisedCosine {
        rolloff,
        samples_per_symbol: sps,
    }
    .evaluate(x))
}

/// A kernel together with its validated parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum PulseShape {
    Sinc,
    RaisedCosine {
        rolloff: RolloffFactor,
        samples_per_symbol: SamplesPerSymbol,
    },
    RootRaisedCosine {
        rolloff: RolloffFactor,
        samples_per_symbol: SamplesPerSymbol,
    },
}

impl PulseShape {
    /// Short name of the kernel
    pub fn name(&self) -> &'static str {
        match self {
            PulseShape::Sinc => "sinc",
            PulseShape::RaisedCosine { .. } => "rcosine",
            PulseShape::RootRaisedCosine { .. } => "sqrtrcosine",
        }
    }

    /// Oversampling factor, if the kernel has one
    pub fn samples_per_symbol(&self) -> Option<SamplesPerSymbol> {
        match self {
            PulseShape::Sinc => None,
            PulseShape::RaisedCosine {
                samples_per_symbol, ..
            }
            | PulseShape::RootRaisedCosine {
                samples_per_symbol, ..
            } => Some(*samples_per_symbol),
        }
    }

    /// Evaluate the kernel at one offset
    pub fn at(&self, x: f64) -> f64 {
        match *self {
            PulseShape::Sinc => sinc_at(x),
            PulseShape::RaisedCosine {
                rolloff,
                samples_per_symbol,
            } => raised_cosine_at(x, rolloff, samples_per_symbol),
            PulseShape::RootRaisedCosine {
                rolloff,
                samples_per_symbol,
            } => root_raised_cosine_at(x, rolloff, samples_per_symbol),
        }
    }

    /// Evaluate the kernel over a vector of offsets
    pub fn evaluate(&self, x: &[f64]) -> Vec<f64> {
        match self {
            PulseShape::Sinc => debug!("sinc over {} samples", x.len()),
            PulseShape::RaisedCosine {
                rolloff,
                samples_per_symbol,
            }
            | PulseShape::RootRaisedCosine {
                rolloff,
                samples_per_symbol,
            } => debug!(
                "{} over {} samples (rolloff={}, sps={})",
                self.name(),
                x.len(),
                rolloff.value(),
                samples_per_symbol.value()
            ),
        }

        x.iter().map(|&xi| self.at(xi)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const TOLERANCE: f64 = 1e-9;

    fn rolloff(b: f64) -> RolloffFactor {
        RolloffFactor::new(b).unwrap()
    }

    fn sps(ns: f64) -> SamplesPerSymbol {
        SamplesPerSymbol::new(ns).unwrap()
    }

    // Maps arbitrary integers onto a grid that hits the singular offsets.
    fn grid_rolloff(b: u8) -> RolloffFactor {
        rolloff((b % 9) as f64 / 8.0)
    }

    fn grid_sps(ns: u8) -> SamplesPerSymbol {
        sps([1.0, 2.0, 4.0, 8.0, 3.5][(ns % 5) as usize])
    }

    #[test]
    fn test_sinc_known_values() {
        let out = sinc(&[0.0, 1.0, 2.0, 0.5]);
        assert_eq!(out[0], 1.0);
        assert_eq!(out[1], 0.0);
        assert_eq!(out[2], 0.0);
        assert!((out[3] - 2.0 / PI).abs() < TOLERANCE);
        assert!((out[3] - 0.6366).abs() < 1e-4);
    }

    #[test]
    fn test_sinc_integer_zeros() {
        for n in 1..50 {
            assert_eq!(sinc_at(n as f64), 0.0);
            assert_eq!(sinc_at(-(n as f64)), 0.0);
        }
    }

    #[test]
    fn test_sinc_empty() {
        assert!(sinc(&[]).is_empty());
    }

    #[test]
    fn test_rcosine_scenario() {
        assert_eq!(rcosine(&[0.0], &[0.5], &[4.0]).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_rcosine_zero_crossings_at_symbol_instants() {
        let ns = 4.0;
        let x: Vec<f64> = (1..10).map(|k| k as f64 * ns).collect();
        for tap in rcosine(&x, &[0.35], &[ns]).unwrap() {
            assert!(tap.abs() < TOLERANCE, "ISI at symbol instant: {}", tap);
        }
    }

    #[test]
    fn test_rcosine_singular_offset() {
        // |2 B t| == 1 at x = Ns / (2 B)
        let b = 0.3;
        let ns = 4.0;
        let x = ns / (2.0 * b);
        let expected = FRAC_PI_4 * sinc_at(1.0 / (2.0 * b));

        let tap = raised_cosine_at(x, rolloff(b), sps(ns));
        assert!(tap.is_finite());
        assert!((tap - expected).abs() < TOLERANCE);

        // Limit agrees with the general formula evaluated close by
        let near = raised_cosine_at(x + 1e-6, rolloff(b), sps(ns));
        assert!((near - expected).abs() < 1e-5);
    }

    #[test]
    fn test_rcosine_full_rolloff_half_symbol() {
        // B = 1: singular at t = 1/2, where the response is exactly 1/2
        let tap = raised_cosine_at(2.0, rolloff(1.0), sps(4.0));
        assert!((tap - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_rcosine_rejects_bad_parameters() {
        let err = rcosine(&[0.0, 1.0], &[1.5], &[4.0]).unwrap_err();
        assert!(err.is_configuration());
        assert!(rcosine(&[0.0], &[-0.1], &[4.0]).is_err());
        assert!(rcosine(&[0.0], &[0.5], &[0.0]).is_err());
        assert!(rcosine(&[0.0], &[0.5], &[-4.0]).is_err());
        assert!(rcosine(&[0.0, 1.0], &[0.5, 0.5], &[4.0]).is_err());
        assert!(rcosine(&[0.0], &[0.5], &[]).is_err());
    }

    #[test]
    fn test_sqrtrcosine_rejects_bad_parameters() {
        let err = sqrtrcosine(&[0.0, 1.0], &[1.5], &[4.0]).unwrap_err();
        assert!(err.is_configuration());
        assert!(sqrtrcosine(&[0.0], &[0.5], &[f64::NAN]).is_err());
        assert!(sqrtrcosine(&[0.0, 1.0, 2.0], &[0.5], &[4.0, 4.0, 4.0]).is_err());
    }

    #[test]
    fn test_sqrtrcosine_dc_limit() {
        for &(b, ns) in &[(0.35, 4.0), (0.5, 8.0), (1.0, 2.0), (0.0, 1.0)] {
            let tap = sqrtrcosine(&[0.0], &[b], &[ns]).unwrap()[0];
            let expected = (1.0 - b + 4.0 * b / PI) / ns;
            assert!((tap - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_sqrtrcosine_quarter_limit() {
        // |4 B t| == 1 at x = Ns / (4 B)
        let b = 0.5;
        let ns = 4.0;
        let x = ns / (4.0 * b);
        let arg = PI / (4.0 * b);
        let expected = (b / 2.0_f64.sqrt())
            * ((1.0 + 2.0 / PI) * arg.sin() + (1.0 - 2.0 / PI) * arg.cos())
            / ns;

        let tap = root_raised_cosine_at(x, rolloff(b), sps(ns));
        assert!(tap.is_finite());
        assert!((tap - expected).abs() < TOLERANCE);

        let near = root_raised_cosine_at(x - 1e-6, rolloff(b), sps(ns));
        assert!((near - expected).abs() < 1e-5);
    }

    #[test]
    fn test_sqrtrcosine_zero_rolloff_is_scaled_sinc() {
        let x: Vec<f64> = (-20..=20).map(|k| k as f64 * 0.5).collect();
        let taps = sqrtrcosine(&x, &[0.0], &[4.0]).unwrap();
        for (xi, tap) in x.iter().zip(taps) {
            assert!((tap - sinc_at(xi / 4.0) / 4.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_no_singular_blowup_on_grid() {
        let x: Vec<f64> = (-256..=256).map(|k| k as f64 * 0.25).collect();
        for b in 0..=8 {
            for &ns in &[1.0, 2.0, 4.0, 8.0] {
                let b = b as f64 / 8.0;
                let rc = rcosine(&x, &[b], &[ns]).unwrap();
                let rrc = sqrtrcosine(&x, &[b], &[ns]).unwrap();
                assert_eq!(rc.len(), x.len());
                assert_eq!(rrc.len(), x.len());
                assert!(rc.iter().all(|v| v.is_finite()), "rcosine B={} Ns={}", b, ns);
                assert!(rrc.iter().all(|v| v.is_finite()), "sqrtrcosine B={} Ns={}", b, ns);
            }
        }
    }

    #[test]
    fn test_overflowing_offsets_are_in_the_tail() {
        for &x in &[f64::MAX, -f64::MAX, f64::INFINITY, 1e300] {
            assert_eq!(raised_cosine_at(x, rolloff(1.0), sps(1.0)), 0.0);
            assert_eq!(root_raised_cosine_at(x, rolloff(1.0), sps(1.0)), 0.0);
        }

        // x / Ns overflows for the smallest normal Ns
        let taps = rcosine(&[1.0, 1e300], &[0.5], &[f64::MIN_POSITIVE]).unwrap();
        assert_eq!(taps, vec![0.0, 0.0]);
        let taps = sqrtrcosine(&[1.0, 1e300], &[0.5], &[f64::MIN_POSITIVE]).unwrap();
        assert_eq!(taps, vec![0.0, 0.0]);
    }

    #[test]
    fn test_subnormal_rolloff_is_zero_rolloff() {
        let b = rolloff(5e-324);
        for &x in &[0.5, 3.0, 1e10, 1e15, f64::MAX] {
            let rc = raised_cosine_at(x, b, sps(4.0));
            let rrc = root_raised_cosine_at(x, b, sps(4.0));
            assert!(rc.is_finite() && rrc.is_finite(), "x={}", x);
            assert_eq!(rc, raised_cosine_at(x, rolloff(0.0), sps(4.0)));
            assert_eq!(rrc, root_raised_cosine_at(x, rolloff(0.0), sps(4.0)));
        }
    }

    #[test]
    fn test_tiny_offsets_hit_the_peak() {
        let b = 0.5;
        let dc = (1.0 - b + 4.0 * b / PI) / 1.0;
        for &x in &[5e-324, f64::MIN_POSITIVE, 1e-15, -1e-13] {
            let rrc = root_raised_cosine_at(x, rolloff(b), sps(1.0));
            assert!((rrc - dc).abs() < TOLERANCE, "x={} gave {}", x, rrc);
            assert_eq!(raised_cosine_at(x, rolloff(b), sps(1.0)), 1.0);
        }
    }

    #[test]
    fn test_pulse_shape_serde() {
        let shape = PulseShape::RootRaisedCosine {
            rolloff: rolloff(0.35),
            samples_per_symbol: sps(4.0),
        };
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"shape\":\"root-raised-cosine\""));
        let back: PulseShape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);

        let bad = r#"{"shape":"raised-cosine","rolloff":2.0,"samples_per_symbol":4.0}"#;
        assert!(serde_json::from_str::<PulseShape>(bad).is_err());
    }

    #[test]
    fn test_pulse_shape_dispatch() {
        let shape = PulseShape::RaisedCosine {
            rolloff: rolloff(0.5),
            samples_per_symbol: sps(4.0),
        };
        assert_eq!(shape.name(), "rcosine");
        assert_eq!(shape.samples_per_symbol(), Some(sps(4.0)));
        assert_eq!(PulseShape::Sinc.samples_per_symbol(), None);
        assert_eq!(shape.evaluate(&[3.0]), rcosine(&[3.0], &[0.5], &[4.0]).unwrap());
    }

    #[quickcheck]
    fn prop_sinc_is_even(x: f64) -> TestResult {
        if !x.is_finite() {
            return TestResult::discard();
        }
        TestResult::from_bool(sinc_at(x) == sinc_at(-x))
    }

    #[quickcheck]
    fn prop_lengths_preserved(x: Vec<i16>, b: u8, ns: u8) -> bool {
        let x: Vec<f64> = x.into_iter().map(|v| v as f64 / 8.0).collect();
        let b = [grid_rolloff(b).value()];
        let ns = [grid_sps(ns).value()];

        sinc(&x).len() == x.len()
            && rcosine(&x, &b, &ns).unwrap().len() == x.len()
            && sqrtrcosine(&x, &b, &ns).unwrap().len() == x.len()
    }

    #[quickcheck]
    fn prop_raised_cosine_family_is_even(x: i32, b: u8, ns: u8) -> bool {
        let x = x as f64 / 16.0;
        let (b, ns) = (grid_rolloff(b), grid_sps(ns));

        raised_cosine_at(x, b, ns) == raised_cosine_at(-x, b, ns)
            && root_raised_cosine_at(x, b, ns) == root_raised_cosine_at(-x, b, ns)
    }

    #[quickcheck]
    fn prop_taps_are_finite(x: i32, b: u8, ns: u8) -> bool {
        let x = x as f64 / 16.0;
        let (b, ns) = (grid_rolloff(b), grid_sps(ns));

        raised_cosine_at(x, b, ns).is_finite() && root_raised_cosine_at(x, b, ns).is_finite()
    }

    #[quickcheck]
    fn prop_zero_rolloff_is_sinc(x: i32, ns: u8) -> bool {
        let x = x as f64 / 16.0;
        let ns = grid_sps(ns);

        raised_cosine_at(x, rolloff(0.0), ns) == sinc_at(x / ns.value())
    }

    #[quickcheck]
    fn prop_rcosine_peak_is_one(b: u8, ns: u8) -> bool {
        raised_cosine_at(0.0, grid_rolloff(b), grid_sps(ns)) == 1.0
    }
}

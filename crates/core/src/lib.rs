//! pulsekit core - pulse-shaping kernels
//!
//! This crate provides the normalized sinc, raised cosine and root raised
//! cosine impulse responses as plain vector-in, vector-out functions, plus
//! the parameter validation and tap analysis helpers around them.

pub mod buffer;
pub mod error;
pub mod params;
pub mod pulse;
pub mod response;

pub use error::{CoreError, Result};
pub use pulse::{rcosine, sinc, sqrtrcosine};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        buffer::SampleVector,
        error::{CoreError, Result},
        params::{RolloffFactor, SamplesPerSymbol},
        pulse::{rcosine, sinc, sqrtrcosine, PulseShape},
        response::{convolve, energy, FrequencyResponse},
    };
}

//! Frequency bands and the band-pass seam applied before each warp.

use std::fmt;

use crate::error::DvvError;

/// A pass band `[low, high]` in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    low: f64,
    high: f64,
}

impl FrequencyBand {
    /// Create a band with corner frequencies `low` and `high`.
    ///
    /// # Errors
    ///
    /// Returns [`DvvError::InvalidBand`] unless both bounds are finite and
    /// `0 < low < high`.
    pub fn new(low: f64, high: f64) -> Result<Self, DvvError> {
        if !(low.is_finite() && high.is_finite() && low > 0.0 && low < high) {
            return Err(DvvError::InvalidBand { low, high });
        }
        Ok(Self { low, high })
    }

    /// Lower corner frequency in Hz.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper corner frequency in Hz.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Geometric centre frequency in Hz.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.low * self.high).sqrt()
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} Hz", self.low, self.high)
    }
}

/// Restricts a signal to one frequency band before warping.
///
/// Implementations must return exactly as many samples as they receive.
pub trait BandPass {
    /// Filter `signal`, sampled at `sampling_rate` Hz, to `band`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn filter(&self, signal: &[f64], sampling_rate: f64, band: FrequencyBand) -> Result<Vec<f64>, DvvError>;
}

/// Pass-through filter: every band sees the unfiltered signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Broadband;

impl BandPass for Broadband {
    fn filter(&self, signal: &[f64], _sampling_rate: f64, _band: FrequencyBand) -> Result<Vec<f64>, DvvError> {
        Ok(signal.to_vec())
    }
}

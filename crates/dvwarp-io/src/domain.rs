//! Domain types for dvwarp-io.

use dvwarp_dtw::{Trace, WarpError, Window};

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference and a current trace on a shared, uniformly sampled time axis.
///
/// Produced by [`TraceReader`](crate::TraceReader).
#[derive(Debug, Clone)]
pub struct TracePair {
    /// Sample times in seconds, strictly increasing.
    pub time: Vec<f64>,
    /// Reference trace (the one warped).
    pub reference: Trace,
    /// Current trace.
    pub current: Trace,
    /// Samples per second.
    pub sampling_rate: f64,
}

impl TracePair {
    /// Return the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always `false` for pairs produced by the reader.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Window over the whole record, or over `[tmin, tmax]` when both are given.
    ///
    /// Missing bounds default to the first and last sample time.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::EmptyWindow`] if no sample lies within the bounds.
    pub fn window(&self, tmin: Option<f64>, tmax: Option<f64>) -> Result<Window, WarpError> {
        match (tmin, tmax) {
            (None, None) => Window::range(0..self.len()),
            _ => {
                let lo = tmin.unwrap_or(f64::NEG_INFINITY);
                let hi = tmax.unwrap_or(f64::INFINITY);
                Window::from_time_bounds(&self.time, lo, hi)
            }
        }
    }
}

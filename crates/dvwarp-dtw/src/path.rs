//! Warping paths: one integer lag per sample.

use std::fmt;

use crate::config::Strain;
use crate::error::WarpError;
use crate::surface::ErrorSurface;

/// The lag (in samples) chosen at every sample of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpPath(Vec<isize>);

impl WarpPath {
    /// Create a path from per-sample lags.
    pub(crate) fn new(lags: Vec<isize>) -> Self {
        Self(lags)
    }

    /// Return the lag at every sample.
    #[must_use]
    pub fn lags(&self) -> &[isize] {
        &self.0
    }

    /// Return the number of samples in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest absolute lag change between adjacent samples.
    #[must_use]
    pub fn max_step(&self) -> usize {
        self.0
            .windows(2)
            .map(|w| (w[1] - w[0]).unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Whether the path obeys strain limit `b`: adjacent lags differ by at
    /// most one, and two lag changes are never closer than `b` samples.
    #[must_use]
    pub fn respects_strain(&self, strain: Strain) -> bool {
        if self.max_step() > 1 {
            return false;
        }
        let changes: Vec<usize> = self
            .0
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[0] != w[1])
            .map(|(k, _)| k)
            .collect();
        changes.windows(2).all(|c| c[1] - c[0] >= strain.get())
    }

    /// Sum the error surface along this path.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`WarpError::PathLengthMismatch`] | Path length differs from the surface's sample count |
    /// | [`WarpError::LagOutOfRange`] | A lag lies outside the surface's lag range |
    pub fn cost(&self, err: &ErrorSurface) -> Result<FitError, WarpError> {
        if self.len() != err.n_samples() {
            return Err(WarpError::PathLengthMismatch {
                path: self.len(),
                surface: err.n_samples(),
            });
        }
        let mut total = 0.0;
        for (sample, &lag) in self.0.iter().enumerate() {
            let l = err.index_of(lag).ok_or(WarpError::LagOutOfRange {
                sample,
                lag,
                max_lag: err.max_lag(),
            })?;
            total += err.get(sample, l);
        }
        Ok(FitError(total))
    }
}

/// Error surface summed along a [`WarpPath`]. Zero when every visited cell
/// matches exactly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FitError(f64);

impl FitError {
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

impl<'a> IntoIterator for &'a WarpPath {
    type Item = &'a isize;
    type IntoIter = std::slice::Iter<'a, isize>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

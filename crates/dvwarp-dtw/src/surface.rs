//! Dense sample × lag surfaces.

use std::ops::{Deref, Index};

/// Dense row-major `n_samples × (2 * max_lag + 1)` matrix.
///
/// Row `i` holds one value per candidate lag; column `l` corresponds to lag
/// `l - max_lag`, so column 0 is the most negative lag.
#[derive(Debug, Clone, PartialEq)]
pub struct LagSurface {
    n_samples: usize,
    max_lag: usize,
    data: Vec<f64>,
}

impl LagSurface {
    /// Allocate a zero-filled surface.
    pub(crate) fn zeros(n_samples: usize, max_lag: usize) -> Self {
        Self {
            n_samples,
            max_lag,
            data: vec![0.0; n_samples * (2 * max_lag + 1)],
        }
    }

    /// Return the number of samples (rows).
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Return the number of candidate lags (columns), `2 * max_lag + 1`.
    #[must_use]
    pub fn n_lags(&self) -> usize {
        2 * self.max_lag + 1
    }

    /// Return the largest candidate lag.
    #[must_use]
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Return the smallest candidate lag, `-max_lag`.
    #[must_use]
    pub fn min_lag(&self) -> isize {
        -(self.max_lag as isize)
    }

    /// Return `(n_samples, n_lags)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_samples, self.n_lags())
    }

    /// Convert a lag column index into a lag in samples.
    #[must_use]
    pub fn lag_of(&self, index: usize) -> isize {
        index as isize + self.min_lag()
    }

    /// Convert a lag into its column index, or `None` if outside the lag range.
    #[must_use]
    pub fn index_of(&self, lag: isize) -> Option<usize> {
        let index = lag - self.min_lag();
        usize::try_from(index).ok().filter(|&i| i < self.n_lags())
    }

    /// Return the value at `(sample, lag_index)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn get(&self, sample: usize, lag_index: usize) -> f64 {
        self.data[self.offset(sample, lag_index)]
    }

    pub(crate) fn set(&mut self, sample: usize, lag_index: usize, value: f64) {
        let offset = self.offset(sample, lag_index);
        self.data[offset] = value;
    }

    /// Return all lag values of one sample.
    #[must_use]
    pub fn row(&self, sample: usize) -> &[f64] {
        let n_lags = self.n_lags();
        &self.data[sample * n_lags..(sample + 1) * n_lags]
    }

    pub(crate) fn row_mut(&mut self, sample: usize) -> &mut [f64] {
        let n_lags = self.n_lags();
        &mut self.data[sample * n_lags..(sample + 1) * n_lags]
    }

    /// Return the values of one lag column, in sample order.
    #[must_use]
    pub fn column(&self, lag_index: usize) -> Vec<f64> {
        (0..self.n_samples).map(|i| self.get(i, lag_index)).collect()
    }

    /// Return the raw row-major data.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    fn offset(&self, sample: usize, lag_index: usize) -> usize {
        let n_lags = self.n_lags();
        assert!(
            sample < self.n_samples && lag_index < n_lags,
            "index ({sample}, {lag_index}) out of bounds for surface of shape ({}, {n_lags})",
            self.n_samples
        );
        sample * n_lags + lag_index
    }
}

impl Index<(usize, usize)> for LagSurface {
    type Output = f64;

    fn index(&self, (sample, lag_index): (usize, usize)) -> &Self::Output {
        &self.data[self.offset(sample, lag_index)]
    }
}

/// Pointwise mismatch between two sequences at every sample and lag.
///
/// Built by [`ErrorSurface::compute`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSurface(pub(crate) LagSurface);

impl Deref for ErrorSurface {
    type Target = LagSurface;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Minimum accumulated cost of a strain-admissible path reaching each cell.
///
/// Produced by [`accumulate`](crate::accumulate) or
/// [`accumulate_symmetric`](crate::accumulate_symmetric).
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSurface(pub(crate) LagSurface);

impl DistanceSurface {
    /// Consume and return the underlying surface.
    #[must_use]
    pub fn into_inner(self) -> LagSurface {
        self.0
    }
}

impl Deref for DistanceSurface {
    type Target = LagSurface;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

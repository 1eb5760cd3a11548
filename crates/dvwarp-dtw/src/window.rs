//! Sample windows selecting the sub-range over which warping is measured.

use std::ops::Range;

use crate::error::WarpError;

/// Non-empty, strictly increasing list of 0-based sample indices.
///
/// The window length is the sample dimension `N` of every surface built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window(Vec<usize>);

impl Window {
    /// Create a window covering a contiguous sample range.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::EmptyWindow`] if `range` is empty.
    pub fn range(range: Range<usize>) -> Result<Self, WarpError> {
        if range.is_empty() {
            return Err(WarpError::EmptyWindow);
        }
        Ok(Self(range.collect()))
    }

    /// Create a window from explicit sample indices.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`WarpError::EmptyWindow`] | `indices` is empty |
    /// | [`WarpError::UnsortedWindow`] | Indices are not strictly increasing |
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, WarpError> {
        if indices.is_empty() {
            return Err(WarpError::EmptyWindow);
        }
        if let Some(position) = indices.windows(2).position(|w| w[1] <= w[0]) {
            return Err(WarpError::UnsortedWindow {
                position: position + 1,
            });
        }
        Ok(Self(indices))
    }

    /// Select every sample whose time lies in `[tmin, tmax]`.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::EmptyWindow`] if no sample falls inside the bounds.
    pub fn from_time_bounds(time: &[f64], tmin: f64, tmax: f64) -> Result<Self, WarpError> {
        let indices: Vec<usize> = time
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t >= tmin && t <= tmax)
            .map(|(i, _)| i)
            .collect();
        Self::from_indices(indices)
    }

    /// Return the sample indices.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Return the number of samples in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for windows built through the public constructors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every index addresses a sample of a trace of length `len`.
    pub(crate) fn check_bounds(&self, len: usize) -> Result<(), WarpError> {
        // Indices are sorted, so the last one is the largest.
        match self.0.last() {
            Some(&index) if index >= len => Err(WarpError::WindowOutOfBounds { index, len }),
            _ => Ok(()),
        }
    }

    /// Gather the windowed samples of `values`.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds for `values`.
    #[must_use]
    pub fn gather(&self, values: &[f64]) -> Vec<f64> {
        self.0.iter().map(|&i| values[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_covers_all_indices() {
        let w = Window::range(2..6).unwrap();
        assert_eq!(w.indices(), &[2, 3, 4, 5]);
        assert_eq!(w.len(), 4);
    }

    #[test]
    fn empty_range_rejected() {
        assert!(matches!(Window::range(3..3), Err(WarpError::EmptyWindow)));
    }

    #[test]
    fn unsorted_indices_rejected() {
        let result = Window::from_indices(vec![1, 4, 4, 7]);
        assert!(matches!(result, Err(WarpError::UnsortedWindow { position: 2 })));
    }

    #[test]
    fn time_bounds_are_inclusive() {
        let time = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5];
        let w = Window::from_time_bounds(&time, 0.5, 2.0).unwrap();
        assert_eq!(w.indices(), &[1, 2, 3, 4]);
    }

    #[test]
    fn time_bounds_outside_axis_rejected() {
        let time = [0.0, 1.0, 2.0];
        let result = Window::from_time_bounds(&time, 5.0, 6.0);
        assert!(matches!(result, Err(WarpError::EmptyWindow)));
    }

    #[test]
    fn bounds_check_reports_largest_index() {
        let w = Window::from_indices(vec![0, 3, 9]).unwrap();
        assert!(w.check_bounds(10).is_ok());
        assert!(matches!(
            w.check_bounds(9),
            Err(WarpError::WindowOutOfBounds { index: 9, len: 9 })
        ));
    }

    #[test]
    fn gather_picks_windowed_samples() {
        let w = Window::from_indices(vec![0, 2, 3]).unwrap();
        assert_eq!(w.gather(&[5.0, 6.0, 7.0, 8.0]), vec![5.0, 7.0, 8.0]);
    }
}

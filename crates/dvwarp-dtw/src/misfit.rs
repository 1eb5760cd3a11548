//! Error surface construction.

use tracing::{debug, instrument};

use crate::config::Norm;
use crate::error::WarpError;
use crate::surface::{ErrorSurface, LagSurface};

impl ErrorSurface {
    /// Build the `N × (2 * max_lag + 1)` error surface between `u1` (the
    /// sequence to be warped) and `u0` (the reference).
    ///
    /// Entry `(i, l)` is `norm.misfit(u1[i] - u0[i + lag])` with
    /// `lag = l - max_lag`. Cells where `i + lag` falls off either end are
    /// filled by constant extrapolation along their lag column: from the first
    /// valid sample below the signal start, from the last valid sample past its
    /// end. Every entry is therefore defined and non-negative.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`WarpError::LengthMismatch`] | `u1` and `u0` differ in length |
    /// | [`WarpError::EmptyTrace`] | Both sequences are empty |
    /// | [`WarpError::LagTooLarge`] | `max_lag >= N` |
    #[instrument(skip(u1, u0), fields(n = u1.len()))]
    pub fn compute(u1: &[f64], u0: &[f64], max_lag: usize, norm: Norm) -> Result<Self, WarpError> {
        let n = u1.len();
        if u0.len() != n {
            return Err(WarpError::LengthMismatch {
                reference: n,
                current: u0.len(),
            });
        }
        if n == 0 {
            return Err(WarpError::EmptyTrace);
        }
        if max_lag >= n {
            return Err(WarpError::LagTooLarge {
                max_lag,
                n_samples: n,
            });
        }

        let mut err = LagSurface::zeros(n, max_lag);
        for l in 0..err.n_lags() {
            let lag = err.lag_of(l);
            // Samples i with 0 <= i + lag < n. Non-empty because |lag| < n.
            let first = lag.min(0).unsigned_abs();
            let end = n - lag.max(0).unsigned_abs();

            for i in first..end {
                let j = (i as isize + lag) as usize;
                err.set(i, l, norm.misfit(u1[i] - u0[j]));
            }

            let head = err.get(first, l);
            for i in 0..first {
                err.set(i, l, head);
            }
            let tail = err.get(end - 1, l);
            for i in end..n {
                err.set(i, l, tail);
            }
        }

        debug!(n_lags = err.n_lags(), "error surface built");
        Ok(Self(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l2_entries_are_squared_differences() {
        let u1 = [1.0, 2.0, 4.0, 7.0];
        let u0 = [0.0, 1.0, 3.0, 6.0];
        let err = ErrorSurface::compute(&u1, &u0, 1, Norm::L2).unwrap();
        // lag 0 column: (u1[i] - u0[i])^2 = 1 everywhere
        assert_eq!(err.column(1), vec![1.0, 1.0, 1.0, 1.0]);
        // lag +1, interior: (u1[i] - u0[i+1])^2
        assert_eq!(err.get(0, 2), 0.0);
        assert_eq!(err.get(1, 2), 1.0);
        assert_eq!(err.get(2, 2), 4.0);
    }

    #[test]
    fn l1_entries_are_absolute_differences() {
        let u1 = [1.0, 5.0, 2.0];
        let u0 = [4.0, 1.0, 2.0];
        let err = ErrorSurface::compute(&u1, &u0, 1, Norm::L1).unwrap();
        assert_eq!(err.column(1), vec![3.0, 4.0, 0.0]);
        assert_eq!(err.get(1, 0), 1.0); // |5 - 4|
        assert_eq!(err.get(1, 2), 3.0); // |5 - 2|
    }

    #[test]
    fn corners_copy_nearest_valid_sample() {
        let u1 = [0.0, 1.0, 2.0, 3.0, 4.0];
        let u0 = [2.0, 0.0, 5.0, 1.0, 3.0];
        let err = ErrorSurface::compute(&u1, &u0, 2, Norm::L2).unwrap();
        // lag -2 (column 0): valid from sample 2, so samples 0 and 1 copy sample 2.
        let head = err.get(2, 0);
        assert_eq!(err.get(0, 0), head);
        assert_eq!(err.get(1, 0), head);
        // lag +2 (column 4): valid up to sample 2, so samples 3 and 4 copy sample 2.
        let tail = err.get(2, 4);
        assert_eq!(err.get(3, 4), tail);
        assert_eq!(err.get(4, 4), tail);
        // lag +1 (column 3): only the last sample is a corner.
        assert_eq!(err.get(4, 3), err.get(3, 3));
    }

    #[test]
    fn entries_non_negative_and_finite() {
        let u1 = [-3.0, 1.5, 0.25, 8.0, -2.0, 0.0];
        let u0 = [1.0, -1.0, 2.5, 3.0, 0.5, -4.0];
        for norm in [Norm::L1, Norm::L2] {
            let err = ErrorSurface::compute(&u1, &u0, 3, norm).unwrap();
            assert!(err.as_slice().iter().all(|&v| v >= 0.0 && v.is_finite()));
        }
    }

    #[test]
    fn rejects_lag_equal_to_sample_count() {
        let u = [1.0, 2.0, 3.0];
        let result = ErrorSurface::compute(&u, &u, 3, Norm::L2);
        assert!(matches!(
            result,
            Err(WarpError::LagTooLarge {
                max_lag: 3,
                n_samples: 3
            })
        ));
    }

    #[test]
    fn rejects_unequal_lengths() {
        let result = ErrorSurface::compute(&[1.0, 2.0, 3.0], &[1.0, 2.0], 1, Norm::L2);
        assert!(matches!(result, Err(WarpError::LengthMismatch { .. })));
    }
}

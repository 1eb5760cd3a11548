//! Warp orchestration: error surface, accumulation, backtracking and time conversion.

use tracing::{debug, instrument};

use crate::accumulate::{Sweep, accumulate, accumulate_symmetric};
use crate::backtrack::backtrack;
use crate::config::{Direction, Norm, Strain};
use crate::error::WarpError;
use crate::path::{FitError, WarpPath};
use crate::surface::{DistanceSurface, ErrorSurface};
use crate::trace::TraceView;
use crate::window::Window;

/// Immutable warping configuration. Thread-safe and copyable.
///
/// Construct via [`Warp::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter   | Default              |
/// |-------------|----------------------|
/// | `norm`      | [`Norm::L2`]         |
/// | `strain`    | 1 ([`Strain::UNIT`]) |
/// | `direction` | [`Direction::Forward`] |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warp {
    norm: Norm,
    max_lag: usize,
    strain: Strain,
    direction: Direction,
}

impl Warp {
    /// Create a warping configuration searching lags in `[-max_lag, max_lag]`.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidMaxLag`] if `max_lag` is zero.
    pub fn new(max_lag: usize) -> Result<Self, WarpError> {
        if max_lag == 0 {
            return Err(WarpError::InvalidMaxLag);
        }
        Ok(Self {
            norm: Norm::default(),
            max_lag,
            strain: Strain::default(),
            direction: Direction::default(),
        })
    }

    /// Set the pointwise misfit norm.
    #[must_use]
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Set the strain limit.
    #[must_use]
    pub fn with_strain(mut self, strain: Strain) -> Self {
        self.strain = strain;
        self
    }

    /// Set the accumulation direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Return the misfit norm.
    #[must_use]
    pub fn norm(&self) -> Norm {
        self.norm
    }

    /// Return the maximum lag in samples.
    #[must_use]
    pub fn max_lag(&self) -> usize {
        self.max_lag
    }

    /// Return the strain limit.
    #[must_use]
    pub fn strain(&self) -> Strain {
        self.strain
    }

    /// Return the accumulation direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Warp two already-windowed sequences.
    ///
    /// `u1` is the sequence being warped and `u0` the one it is matched
    /// against: a lag `l` at sample `i` pairs `u1[i]` with `u0[i + l]`.
    ///
    /// | Direction   | Accumulation            | Backtrack walk |
    /// |-------------|-------------------------|----------------|
    /// | `Forward`   | forward                 | backward       |
    /// | `Backward`  | backward                | forward        |
    /// | `Symmetric` | both, combined          | backward       |
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`WarpError::LengthMismatch`] | `u1` and `u0` differ in length |
    /// | [`WarpError::EmptyTrace`] | Both sequences are empty |
    /// | [`WarpError::LagTooLarge`] | `max_lag >= u1.len()` |
    #[instrument(skip(self, u1, u0), fields(n = u1.len(), max_lag = self.max_lag, direction = %self.direction))]
    pub fn warp_windowed(&self, u1: &[f64], u0: &[f64]) -> Result<WindowedWarp, WarpError> {
        let error = ErrorSurface::compute(u1, u0, self.max_lag, self.norm)?;

        let (distance, walk) = match self.direction {
            Direction::Forward => (accumulate(&error, self.strain, Sweep::Forward), Sweep::Backward),
            Direction::Backward => (accumulate(&error, self.strain, Sweep::Backward), Sweep::Forward),
            Direction::Symmetric => (accumulate_symmetric(&error, self.strain), Sweep::Backward),
        };

        let path = backtrack(&distance, &error, self.strain, walk)?;
        let fit_error = path.cost(&error)?;
        debug!(fit_error = %fit_error, "warp complete");

        Ok(WindowedWarp {
            path,
            error,
            distance,
            fit_error,
        })
    }

    /// Warp `reference` onto `current` over `window` and express the result in time.
    ///
    /// The reference is the sequence being warped, so a positive lag means the
    /// current trace is delayed relative to the reference. The time shift at
    /// each windowed sample is `lag / sampling_rate`; the warped time axis is
    /// the window's time plus that shift.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`WarpError::LengthMismatch`] | Traces differ in length |
    /// | [`WarpError::TimeAxisMismatch`] | `time` length differs from the traces |
    /// | [`WarpError::InvalidSamplingRate`] | `sampling_rate` is not positive and finite |
    /// | [`WarpError::WindowOutOfBounds`] | A window index is past the end of the traces |
    /// | [`WarpError::LagTooLarge`] | `max_lag >= window.len()` |
    #[instrument(skip(self, reference, current, time, window), fields(n = reference.len(), window = window.len()))]
    pub fn warp(
        &self,
        reference: TraceView<'_>,
        current: TraceView<'_>,
        time: &[f64],
        window: &Window,
        sampling_rate: f64,
    ) -> Result<WarpResult, WarpError> {
        if reference.len() != current.len() {
            return Err(WarpError::LengthMismatch {
                reference: reference.len(),
                current: current.len(),
            });
        }
        if time.len() != reference.len() {
            return Err(WarpError::TimeAxisMismatch {
                time: time.len(),
                trace: reference.len(),
            });
        }
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(WarpError::InvalidSamplingRate {
                rate: sampling_rate,
            });
        }
        window.check_bounds(reference.len())?;

        let u1 = window.gather(reference.as_slice());
        let u0 = window.gather(current.as_slice());
        let windowed = self.warp_windowed(&u1, &u0)?;

        let window_time = window.gather(time);
        let time_shift: Vec<f64> = windowed
            .path
            .lags()
            .iter()
            .map(|&lag| lag as f64 / sampling_rate)
            .collect();
        let warped_time = window_time
            .iter()
            .zip(&time_shift)
            .map(|(t, dt)| t + dt)
            .collect();
        let lag_indices = windowed
            .path
            .lags()
            .iter()
            .map(|&lag| (lag + self.max_lag as isize) as usize)
            .collect();

        Ok(WarpResult {
            window: window.clone(),
            window_time,
            lags: windowed.path,
            lag_indices,
            time_shift,
            warped_time,
            distance: windowed.distance,
            fit_error: windowed.fit_error,
        })
    }
}

/// Sample-domain output of [`Warp::warp_windowed`].
#[derive(Debug, Clone)]
pub struct WindowedWarp {
    /// Recovered lag at every sample.
    pub path: WarpPath,
    /// Error surface the path was measured on.
    pub error: ErrorSurface,
    /// Distance surface the path was backtracked from.
    pub distance: DistanceSurface,
    /// Sum of the error surface along the path.
    pub fit_error: FitError,
}

/// Output of [`Warp::warp`].
#[derive(Debug, Clone)]
pub struct WarpResult {
    /// Window the warp was measured over.
    pub window: Window,
    /// Time of each windowed sample.
    pub window_time: Vec<f64>,
    /// Recovered lag (samples) at each windowed sample.
    pub lags: WarpPath,
    /// Column index of each lag in the surfaces (`lag + max_lag`).
    pub lag_indices: Vec<usize>,
    /// Time shift (`lag / sampling_rate`) at each windowed sample.
    pub time_shift: Vec<f64>,
    /// Warped time axis, `window_time + time_shift`.
    pub warped_time: Vec<f64>,
    /// Distance surface the path was backtracked from.
    pub distance: DistanceSurface,
    /// Sum of the error surface along the path.
    pub fit_error: FitError,
}

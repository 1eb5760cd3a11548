use dvwarp_dtw::WarpError;

/// Errors from dv/v estimation.
#[derive(Debug, thiserror::Error)]
pub enum DvvError {
    /// Returned when a frequency band is not `0 < low < high` with finite bounds.
    #[error("invalid frequency band [{low}, {high}] Hz: need 0 < low < high")]
    InvalidBand {
        /// Lower corner frequency.
        low: f64,
        /// Upper corner frequency.
        high: f64,
    },

    /// Returned when no frequency bands are configured.
    #[error("at least one frequency band is required")]
    EmptyBands,

    /// Returned when the regression cannot be solved.
    #[error("degenerate regression: {reason}")]
    DegenerateRegression {
        /// Why the fit is undefined.
        reason: &'static str,
    },

    /// Returned when abscissa and ordinate differ in length.
    #[error("regression input length mismatch: {x} abscissa values, {y} ordinate values")]
    SeriesLengthMismatch {
        /// Number of abscissa values.
        x: usize,
        /// Number of ordinate values.
        y: usize,
    },

    /// Returned when the regression weights do not match the window length.
    #[error("expected {expected} regression weights, got {got}")]
    WeightLengthMismatch {
        /// Number of windowed samples.
        expected: usize,
        /// Number of weights supplied.
        got: usize,
    },

    /// Returned when a band-pass filter changes the signal length.
    #[error("band-pass filter returned {got} samples for a {expected}-sample signal")]
    FilterLengthMismatch {
        /// Input length.
        expected: usize,
        /// Output length.
        got: usize,
    },

    /// Wraps an error from the underlying warp.
    #[error("warp failed: {0}")]
    Warp(#[from] WarpError),
}

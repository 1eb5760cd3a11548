//! Error types for dynamic warping.

/// Errors from input validation and warping.
///
/// Every variant is a caller contract violation: the call is aborted before
/// (or at) the offending operation and no partial result is produced.
#[derive(Debug, thiserror::Error)]
pub enum WarpError {
    /// Returned when an empty slice is provided as a trace.
    #[error("trace must be non-empty")]
    EmptyTrace,

    /// Returned when a trace contains NaN, infinity, or negative infinity.
    #[error("trace contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when the two traces being compared differ in length.
    #[error("traces must have equal length: reference has {reference}, current has {current}")]
    LengthMismatch {
        /// Length of the reference trace.
        reference: usize,
        /// Length of the current trace.
        current: usize,
    },

    /// Returned when the time axis does not cover the traces sample-for-sample.
    #[error("time axis has {time} samples but traces have {trace}")]
    TimeAxisMismatch {
        /// Length of the time axis.
        time: usize,
        /// Length of the traces.
        trace: usize,
    },

    /// Returned when the lag range is at least as wide as the usable samples.
    #[error("max lag {max_lag} must be smaller than the number of samples {n_samples}")]
    LagTooLarge {
        /// The requested maximum lag.
        max_lag: usize,
        /// Number of samples in the window.
        n_samples: usize,
    },

    /// Returned when a zero maximum lag is requested.
    #[error("max lag must be at least 1")]
    InvalidMaxLag,

    /// Returned when the strain limit is zero.
    #[error("strain limit must be at least 1, got {strain}")]
    InvalidStrain {
        /// The invalid strain limit.
        strain: usize,
    },

    /// Returned when a norm selector string is not recognised.
    #[error("unknown norm \"{selector}\" (expected l2 or l1)")]
    UnknownNorm {
        /// The rejected selector.
        selector: String,
    },

    /// Returned when a direction selector string is not recognised.
    #[error("unknown direction \"{selector}\" (expected forward, backward, or symmetric)")]
    UnknownDirection {
        /// The rejected selector.
        selector: String,
    },

    /// Returned when a numeric direction code is outside `{1, -1, 0}`.
    #[error("invalid direction code {value} (expected 1, -1, or 0)")]
    InvalidDirection {
        /// The rejected code.
        value: i8,
    },

    /// Returned when the sampling rate is not a positive finite number.
    #[error("sampling rate must be positive and finite, got {rate}")]
    InvalidSamplingRate {
        /// The rejected sampling rate.
        rate: f64,
    },

    /// Returned when a window contains no samples.
    #[error("window must contain at least one sample")]
    EmptyWindow,

    /// Returned when window indices are not strictly increasing.
    #[error("window indices must be strictly increasing (violated at position {position})")]
    UnsortedWindow {
        /// Position in the window where ordering breaks.
        position: usize,
    },

    /// Returned when a window index falls outside the traces.
    #[error("window index {index} out of bounds for traces of length {len}")]
    WindowOutOfBounds {
        /// The offending sample index.
        index: usize,
        /// Length of the traces.
        len: usize,
    },

    /// Returned when a path and an error surface disagree on the sample count.
    #[error("path has {path} samples but the error surface has {surface}")]
    PathLengthMismatch {
        /// Length of the path.
        path: usize,
        /// Sample dimension of the surface.
        surface: usize,
    },

    /// Returned when a path visits a lag outside the surface's lag range.
    #[error("lag {lag} at sample {sample} is outside [-{max_lag}, {max_lag}]")]
    LagOutOfRange {
        /// Sample at which the lag was found.
        sample: usize,
        /// The offending lag.
        lag: isize,
        /// Maximum lag of the surface.
        max_lag: usize,
    },

    /// Returned when a distance surface and an error surface differ in shape.
    #[error("surface shapes differ: distance is {distance:?}, error is {error:?}")]
    SurfaceShapeMismatch {
        /// `(n_samples, n_lags)` of the distance surface.
        distance: (usize, usize),
        /// `(n_samples, n_lags)` of the error surface.
        error: (usize, usize),
    },
}

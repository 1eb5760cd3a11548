//! Relative velocity change (dv/v) estimation from warping time shifts.
//!
//! Filters a reference and a current trace into frequency bands, warps them
//! with strain-limited DTW, and regresses the recovered time shifts against
//! lapse time. Band-pass filtering and regression are trait seams.

mod band;
mod config;
mod error;
mod regression;
mod result;

pub use band::{BandPass, Broadband, FrequencyBand};
pub use config::DvvConfig;
pub use error::DvvError;
pub use regression::{LeastSquares, LinearFit, ShiftRegression};
pub use result::{BandDvv, DvvResult};

//! Strain-limited dynamic time warping (Hale 2013) for lag estimation.
//!
//! Pure computation, no I/O. Builds a sample × lag error surface between
//! two sequences, accumulates it into a distance surface under a strain
//! limit, backtracks the optimal lag path and reports its fit error.

mod accumulate;
mod backtrack;
mod config;
mod error;
mod misfit;
mod path;
mod surface;
mod trace;
mod warp;
mod window;

pub use accumulate::{Sweep, accumulate, accumulate_symmetric};
pub use backtrack::backtrack;
pub use config::{Direction, Norm, Strain};
pub use error::WarpError;
pub use path::{FitError, WarpPath};
pub use surface::{DistanceSurface, ErrorSurface, LagSurface};
pub use trace::{Trace, TraceView};
pub use warp::{Warp, WarpResult, WindowedWarp};
pub use window::Window;

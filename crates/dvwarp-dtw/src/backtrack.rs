//! Optimal path recovery from a distance surface.

use tracing::{debug, instrument};

use crate::accumulate::{Candidates, Step, Sweep};
use crate::config::Strain;
use crate::error::WarpError;
use crate::path::WarpPath;
use crate::surface::{DistanceSurface, ErrorSurface, LagSurface};

/// Walk `dist` in `walk` order and return the lag chosen at every sample.
///
/// `dist` must have been accumulated in the opposite order
/// (`walk.reverse()`); the walk starts where that sweep ended. The starting
/// lag is the one with minimum accumulated distance on the boundary row. Each
/// later step re-evaluates the three predecessors used during accumulation and
/// follows the cheapest, keeping the current lag on ties and otherwise
/// preferring `l - 1` over `l + 1`. When the lag changes with `b > 1`, every
/// sample skipped by the strain ramp takes the new lag and the walk resumes
/// `b` samples further on.
///
/// # Errors
///
/// Returns [`WarpError::SurfaceShapeMismatch`] if the two surfaces differ in shape.
#[instrument(skip(dist, err, strain), fields(n = dist.n_samples(), strain = strain.get()))]
pub fn backtrack(
    dist: &DistanceSurface,
    err: &ErrorSurface,
    strain: Strain,
    walk: Sweep,
) -> Result<WarpPath, WarpError> {
    if dist.shape() != err.shape() {
        return Err(WarpError::SurfaceShapeMismatch {
            distance: dist.shape(),
            error: err.shape(),
        });
    }

    let n = dist.n_samples();
    let sweep = walk.reverse();
    let end = sweep.first(n);

    let mut i = walk.first(n);
    let mut l = boundary_minimum(dist, i);
    let mut lags = vec![0isize; n];
    lags[i] = dist.lag_of(l);

    let mut n_changes = 0usize;
    while i != end {
        let c = Candidates::at(dist, err, i, l, strain, sweep);
        let next = match c.best() {
            Step::Stay => {
                i = c.j1;
                l
            }
            Step::Minus => {
                i = c.jb;
                c.l_minus
            }
            Step::Plus => {
                i = c.jb;
                c.l_plus
            }
        };
        if next != l {
            n_changes += 1;
        }
        l = next;

        // Everything from j1 through the new position holds the new lag.
        let (lo, hi) = if c.j1 <= i { (c.j1, i) } else { (i, c.j1) };
        for lag in &mut lags[lo..=hi] {
            *lag = dist.lag_of(l);
        }
    }

    debug!(n_changes, "path backtracked");
    Ok(WarpPath::new(lags))
}

/// Lag index with the smallest distance on row `sample`.
///
/// Exact ties go to the lag nearest zero, then to the negative side, so that a
/// flat boundary row (e.g. identical inputs) starts the walk at zero lag.
fn boundary_minimum(dist: &LagSurface, sample: usize) -> usize {
    let row = dist.row(sample);
    let mut best = 0;
    for (l, &value) in row.iter().enumerate().skip(1) {
        let nearer = dist.lag_of(l).unsigned_abs() < dist.lag_of(best).unsigned_abs();
        if value < row[best] || (value == row[best] && nearer) {
            best = l;
        }
    }
    best
}

//! Distance accumulation (Hale 2013, equations 6 and 10).
//!
//! Sweeping samples in one time direction, each cell `(i, l)` takes its error
//! plus the cheapest of three predecessors:
//!
//! ```text
//! d[jb, l-1] + Σ e[k, l-1]    (lag decreases, ramped over the skipped samples k)
//! d[j1, l]                    (lag unchanged)
//! d[jb, l+1] + Σ e[k, l+1]    (lag increases, ramped over the skipped samples k)
//! ```
//!
//! where `j1` is one sample back and `jb` is `b` samples back in sweep order,
//! both clamped to the signal, and `k` runs over the samples strictly between
//! `jb` and `i`. Lag columns are clamped at the edges of the lag range.

use std::ops::Range;

use tracing::{debug, instrument};

use crate::config::Strain;
use crate::surface::{DistanceSurface, ErrorSurface, LagSurface};

/// Order in which samples are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Increasing sample index.
    Forward,
    /// Decreasing sample index.
    Backward,
}

impl Sweep {
    /// Return the opposite order.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// First sample visited in a signal of `n` samples.
    pub(crate) fn first(self, n: usize) -> usize {
        match self {
            Self::Forward => 0,
            Self::Backward => n - 1,
        }
    }

    /// All samples in visiting order.
    pub(crate) fn samples(self, n: usize) -> impl Iterator<Item = usize> {
        (0..n).map(move |k| match self {
            Self::Forward => k,
            Self::Backward => n - 1 - k,
        })
    }

    /// The sample `k` steps before `i` in visiting order, clamped to `[0, n)`.
    pub(crate) fn back(self, i: usize, k: usize, n: usize) -> usize {
        match self {
            Self::Forward => i.saturating_sub(k),
            Self::Backward => (i + k).min(n - 1),
        }
    }
}

/// Which predecessor a cell was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Minus,
    Stay,
    Plus,
}

/// The three predecessor costs of one cell, with the indices they came from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidates {
    pub(crate) minus: f64,
    pub(crate) stay: f64,
    pub(crate) plus: f64,
    pub(crate) l_minus: usize,
    pub(crate) l_plus: usize,
    pub(crate) j1: usize,
    pub(crate) jb: usize,
}

impl Candidates {
    /// Evaluate the predecessors of `(i, l)` for a surface swept in `sweep` order.
    ///
    /// `i` must not be the first sample of the sweep.
    pub(crate) fn at(
        dist: &LagSurface,
        err: &LagSurface,
        i: usize,
        l: usize,
        strain: Strain,
        sweep: Sweep,
    ) -> Self {
        let n = dist.n_samples();
        let j1 = sweep.back(i, 1, n);
        let jb = sweep.back(i, strain.get(), n);
        let l_minus = l.saturating_sub(1);
        let l_plus = (l + 1).min(dist.n_lags() - 1);

        let mut minus = dist.get(jb, l_minus);
        let stay = dist.get(j1, l);
        let mut plus = dist.get(jb, l_plus);
        for k in skipped(j1, jb) {
            minus += err.get(k, l_minus);
            plus += err.get(k, l_plus);
        }

        Self {
            minus,
            stay,
            plus,
            l_minus,
            l_plus,
            j1,
            jb,
        }
    }

    /// Cheapest of the three predecessor costs.
    pub(crate) fn min(&self) -> f64 {
        self.minus.min(self.stay).min(self.plus)
    }

    /// Branch achieving the minimum. Ties keep the lag, then prefer `l - 1`.
    pub(crate) fn best(&self) -> Step {
        if self.stay <= self.minus && self.stay <= self.plus {
            Step::Stay
        } else if self.minus <= self.plus {
            Step::Minus
        } else {
            Step::Plus
        }
    }
}

/// Samples strictly between `jb` and the current sample, i.e. `j1` up to but
/// excluding `jb`. Empty when `j1 == jb`.
pub(crate) fn skipped(j1: usize, jb: usize) -> Range<usize> {
    if j1 >= jb { jb + 1..j1 + 1 } else { j1..jb }
}

/// Accumulate the error surface into a distance surface in one time direction.
///
/// The first sample of the sweep is seeded directly from the error surface.
/// Runs in O(N · L · b) time; rows are computed strictly in sweep order.
#[must_use]
#[instrument(skip(err, strain), fields(n = err.n_samples(), n_lags = err.n_lags(), strain = strain.get()))]
pub fn accumulate(err: &ErrorSurface, strain: Strain, sweep: Sweep) -> DistanceSurface {
    let n = err.n_samples();
    let mut dist = LagSurface::zeros(n, err.max_lag());

    let first = sweep.first(n);
    dist.row_mut(first).copy_from_slice(err.row(first));

    for i in sweep.samples(n).skip(1) {
        for l in 0..err.n_lags() {
            let best = Candidates::at(&dist, err, i, l, strain, sweep).min();
            dist.set(i, l, err.get(i, l) + best);
        }
    }

    debug!(?sweep, "distance surface accumulated");
    DistanceSurface(dist)
}

/// Accumulate in both directions and combine the two surfaces.
///
/// Returns `forward + backward - error`: each directional surface already
/// contains the error at the shared cell, so one copy is removed. The two
/// sweeps are independent and run concurrently.
#[must_use]
#[instrument(skip(err, strain), fields(n = err.n_samples(), n_lags = err.n_lags(), strain = strain.get()))]
pub fn accumulate_symmetric(err: &ErrorSurface, strain: Strain) -> DistanceSurface {
    let (forward, backward) = rayon::join(
        || accumulate(err, strain, Sweep::Forward),
        || accumulate(err, strain, Sweep::Backward),
    );

    let mut combined = forward.into_inner();
    for i in 0..combined.n_samples() {
        let bwd = backward.row(i);
        let e = err.row(i);
        for (l, cell) in combined.row_mut(i).iter_mut().enumerate() {
            *cell = *cell + bwd[l] - e[l];
        }
    }
    DistanceSurface(combined)
}

//! Linear regression of time shift against time.
//!
//! A uniform relative velocity change `dv/v` produces time shifts that grow
//! linearly with lapse time, `dt = -(dv/v) * t`. The slope of a straight-line
//! fit therefore estimates `-dv/v`.

use crate::error::DvvError;

/// Straight-line fit `y = intercept + slope * x`, plus a fit through the origin
/// `y = slope0 * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope of the fit with intercept.
    pub slope: f64,
    /// Standard error of `slope`.
    pub slope_err: f64,
    /// Intercept of the fit with intercept.
    pub intercept: f64,
    /// Standard error of `intercept`.
    pub intercept_err: f64,
    /// Slope of the fit through the origin.
    pub slope0: f64,
    /// Standard error of `slope0`.
    pub slope0_err: f64,
}

/// Fits a line to `(x, y)` points with per-point weights.
pub trait ShiftRegression {
    /// Fit `y` against `x`, weighting point `i` by `weights[i]`.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn fit(&self, x: &[f64], y: &[f64], weights: &[f64]) -> Result<LinearFit, DvvError>;
}

/// Weighted ordinary least squares.
///
/// Only points with positive weight count. With `m` such points the weights
/// are rescaled to sum to `m`, so only their ratios matter, and standard
/// errors come from the weighted residual variance with `m - 2` degrees of
/// freedom for the fit with intercept and `m - 1` for the fit through the
/// origin. A zero weight therefore removes its point entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastSquares;

impl ShiftRegression for LeastSquares {
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DvvError::SeriesLengthMismatch`] | `x` and `y` differ in length |
    /// | [`DvvError::WeightLengthMismatch`] | `weights` differs in length from `x` |
    /// | [`DvvError::DegenerateRegression`] | Fewer than 3 positively weighted points, invalid weights, or constant `x` |
    fn fit(&self, x: &[f64], y: &[f64], weights: &[f64]) -> Result<LinearFit, DvvError> {
        let n = x.len();
        if y.len() != n {
            return Err(DvvError::SeriesLengthMismatch { x: n, y: y.len() });
        }
        if weights.len() != n {
            return Err(DvvError::WeightLengthMismatch {
                expected: n,
                got: weights.len(),
            });
        }
        if n < 3 {
            return Err(DvvError::DegenerateRegression {
                reason: "at least 3 points are required",
            });
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DvvError::DegenerateRegression {
                reason: "weights must be finite and non-negative",
            });
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(DvvError::DegenerateRegression {
                reason: "weights sum to zero",
            });
        }
        let m = weights.iter().filter(|&&w| w > 0.0).count();
        if m < 3 {
            return Err(DvvError::DegenerateRegression {
                reason: "at least 3 points need a positive weight",
            });
        }
        let nf = m as f64;
        let w: Vec<f64> = weights.iter().map(|wi| wi * nf / total).collect();

        let x_mean = weighted_sum(&w, x, |xi| xi) / nf;
        let y_mean = weighted_sum(&w, y, |yi| yi) / nf;
        let sxx = weighted_sum(&w, x, |xi| (xi - x_mean).powi(2));
        if sxx <= f64::EPSILON * nf * x_mean.abs().max(1.0).powi(2) {
            return Err(DvvError::DegenerateRegression {
                reason: "abscissa has no spread",
            });
        }
        let sxy: f64 = w
            .iter()
            .zip(x.iter().zip(y))
            .map(|(wi, (xi, yi))| wi * (xi - x_mean) * (yi - y_mean))
            .sum();

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let rss: f64 = w
            .iter()
            .zip(x.iter().zip(y))
            .map(|(wi, (xi, yi))| wi * (yi - intercept - slope * xi).powi(2))
            .sum();
        let var = rss / (nf - 2.0);
        let slope_err = (var / sxx).sqrt();
        let intercept_err = (var * (1.0 / nf + x_mean * x_mean / sxx)).sqrt();

        let sxx0 = weighted_sum(&w, x, |xi| xi * xi);
        let sxy0: f64 = w.iter().zip(x.iter().zip(y)).map(|(wi, (xi, yi))| wi * xi * yi).sum();
        let slope0 = sxy0 / sxx0;
        let rss0: f64 = w
            .iter()
            .zip(x.iter().zip(y))
            .map(|(wi, (xi, yi))| wi * (yi - slope0 * xi).powi(2))
            .sum();
        let slope0_err = (rss0 / (nf - 1.0) / sxx0).sqrt();

        Ok(LinearFit {
            slope,
            slope_err,
            intercept,
            intercept_err,
            slope0,
            slope0_err,
        })
    }
}

fn weighted_sum(w: &[f64], values: &[f64], f: impl Fn(f64) -> f64) -> f64 {
    w.iter().zip(values).map(|(wi, &v)| wi * f(v)).sum()
}

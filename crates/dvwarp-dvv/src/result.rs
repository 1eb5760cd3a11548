//! Result types for dv/v estimation.

use dvwarp_dtw::WarpResult;

use crate::band::FrequencyBand;
use crate::regression::LinearFit;

/// dv/v estimate for one frequency band.
///
/// Velocity changes are in percent; intercepts are in seconds.
#[derive(Debug, Clone)]
pub struct BandDvv {
    /// The band the traces were filtered to.
    pub band: FrequencyBand,
    /// Relative velocity change from the fit with intercept, in percent.
    pub dvv: f64,
    /// Standard error of `dvv`, in percent.
    pub dvv_err: f64,
    /// Time-shift intercept, in seconds.
    pub intercept: f64,
    /// Standard error of `intercept`, in seconds.
    pub intercept_err: f64,
    /// Relative velocity change from the fit through the origin, in percent.
    pub dvv0: f64,
    /// Standard error of `dvv0`, in percent.
    pub dvv0_err: f64,
    /// Warp of the filtered traces the regression was run on.
    pub warp: WarpResult,
}

impl BandDvv {
    /// Convert a regression of time shift against time into velocity changes.
    ///
    /// `dv/v = -slope`, scaled to percent.
    pub(crate) fn from_fit(band: FrequencyBand, fit: LinearFit, warp: WarpResult) -> Self {
        Self {
            band,
            dvv: -fit.slope * 100.0,
            dvv_err: fit.slope_err * 100.0,
            intercept: fit.intercept,
            intercept_err: fit.intercept_err,
            dvv0: -fit.slope0 * 100.0,
            dvv0_err: fit.slope0_err * 100.0,
            warp,
        }
    }
}

/// Per-band dv/v estimates, ordered as the configured bands.
#[derive(Debug, Clone)]
pub struct DvvResult {
    /// One entry per band.
    pub bands: Vec<BandDvv>,
}

impl DvvResult {
    /// Return the band estimate with the smallest `dvv_err`, if any.
    #[must_use]
    pub fn most_certain(&self) -> Option<&BandDvv> {
        self.bands.iter().min_by(|a, b| a.dvv_err.total_cmp(&b.dvv_err))
    }
}

//! Configuration builder for multi-band dv/v estimation.

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use dvwarp_dtw::{Trace, TraceView, Warp, Window};

use crate::band::{BandPass, FrequencyBand};
use crate::error::DvvError;
use crate::regression::{LeastSquares, ShiftRegression};
use crate::result::{BandDvv, DvvResult};

/// Configuration for dv/v estimation over one or more frequency bands.
///
/// Construct via [`DvvConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter            | Default                          |
/// |----------------------|----------------------------------|
/// | `regression_weights` | uniform over the window          |
#[derive(Debug, Clone)]
pub struct DvvConfig {
    pub(crate) warp: Warp,
    pub(crate) bands: Vec<FrequencyBand>,
    pub(crate) regression_weights: Option<Vec<f64>>,
}

impl DvvConfig {
    /// Create a configuration warping with `warp` in each of `bands`.
    ///
    /// # Errors
    ///
    /// Returns [`DvvError::EmptyBands`] if `bands` is empty.
    pub fn new(warp: Warp, bands: Vec<FrequencyBand>) -> Result<Self, DvvError> {
        if bands.is_empty() {
            return Err(DvvError::EmptyBands);
        }
        Ok(Self {
            warp,
            bands,
            regression_weights: None,
        })
    }

    /// Weight each windowed sample in the time-shift regression. Must have one
    /// entry per window sample; checked when estimating.
    #[must_use]
    pub fn with_regression_weights(mut self, weights: Vec<f64>) -> Self {
        self.regression_weights = Some(weights);
        self
    }

    /// Return the warp configuration applied in every band.
    #[must_use]
    pub fn warp(&self) -> &Warp {
        &self.warp
    }

    /// Return the configured bands.
    #[must_use]
    pub fn bands(&self) -> &[FrequencyBand] {
        &self.bands
    }

    /// Return the regression weights, if set.
    #[must_use]
    pub fn regression_weights(&self) -> Option<&[f64]> {
        self.regression_weights.as_deref()
    }

    /// Estimate dv/v in every band with a least-squares regression.
    ///
    /// See [`DvvConfig::estimate_with`].
    ///
    /// # Errors
    ///
    /// As [`DvvConfig::estimate_with`].
    pub fn estimate<F>(
        &self,
        reference: TraceView<'_>,
        current: TraceView<'_>,
        time: &[f64],
        window: &Window,
        sampling_rate: f64,
        filter: &F,
    ) -> Result<DvvResult, DvvError>
    where
        F: BandPass + Sync,
    {
        self.estimate_with(reference, current, time, window, sampling_rate, filter, &LeastSquares)
    }

    /// Estimate dv/v in every band.
    ///
    /// For each band, both traces are filtered, the filtered reference is
    /// warped onto the filtered current trace over `window`, and the time
    /// shifts are regressed against window time. `dv/v = -slope`, in percent.
    /// Bands are processed in parallel; results keep the configured order.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DvvError::WeightLengthMismatch`] | Regression weights do not match the window length |
    /// | [`DvvError::FilterLengthMismatch`] | The filter changed a trace's length |
    /// | [`DvvError::Warp`] | The warp rejected its inputs, or the filter produced non-finite samples |
    /// | [`DvvError::DegenerateRegression`] | The window is too short or has no time spread |
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip_all, fields(n = reference.len(), n_bands = self.bands.len()))]
    pub fn estimate_with<F, R>(
        &self,
        reference: TraceView<'_>,
        current: TraceView<'_>,
        time: &[f64],
        window: &Window,
        sampling_rate: f64,
        filter: &F,
        regression: &R,
    ) -> Result<DvvResult, DvvError>
    where
        F: BandPass + Sync,
        R: ShiftRegression + Sync,
    {
        if let Some(weights) = &self.regression_weights
            && weights.len() != window.len()
        {
            return Err(DvvError::WeightLengthMismatch {
                expected: window.len(),
                got: weights.len(),
            });
        }
        let uniform;
        let weights = match &self.regression_weights {
            Some(w) => w.as_slice(),
            None => {
                uniform = vec![1.0; window.len()];
                uniform.as_slice()
            }
        };

        let bands = self
            .bands
            .par_iter()
            .map(|&band| -> Result<BandDvv, DvvError> {
                let reference = filtered(filter, reference, sampling_rate, band)?;
                let current = filtered(filter, current, sampling_rate, band)?;
                let warp = self.warp.warp(
                    reference.as_view(),
                    current.as_view(),
                    time,
                    window,
                    sampling_rate,
                )?;
                let fit = regression.fit(&warp.window_time, &warp.time_shift, weights)?;
                let estimate = BandDvv::from_fit(band, fit, warp);
                debug!(%band, dvv = estimate.dvv, dvv_err = estimate.dvv_err, "band estimated");
                Ok(estimate)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(n_bands = bands.len(), "dv/v estimation complete");
        Ok(DvvResult { bands })
    }
}

fn filtered<F: BandPass>(
    filter: &F,
    signal: TraceView<'_>,
    sampling_rate: f64,
    band: FrequencyBand,
) -> Result<Trace, DvvError> {
    let out = filter.filter(signal.as_slice(), sampling_rate, band)?;
    if out.len() != signal.len() {
        return Err(DvvError::FilterLengthMismatch {
            expected: signal.len(),
            got: out.len(),
        });
    }
    Ok(Trace::new(out)?)
}

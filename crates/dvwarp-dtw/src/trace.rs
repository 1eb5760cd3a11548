//! Sampled traces checked once on construction.

use crate::error::WarpError;

/// Regularly sampled amplitudes with at least one sample and no NaN or
/// infinite value.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace(Vec<f64>);

impl Trace {
    /// Take ownership of `samples` after checking them.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`WarpError::EmptyTrace`] | `samples` is empty |
    /// | [`WarpError::NonFiniteValue`] | A sample is NaN or infinite (first offending index) |
    pub fn new(samples: Vec<f64>) -> Result<Self, WarpError> {
        if samples.is_empty() {
            return Err(WarpError::EmptyTrace);
        }
        match samples.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(WarpError::NonFiniteValue { index }),
            None => Ok(Self(samples)),
        }
    }

    /// Borrow the samples for a warp or dv/v run.
    #[must_use]
    pub fn as_view(&self) -> TraceView<'_> {
        TraceView(&self.0)
    }
}

/// Borrowed samples of a [`Trace`]. Only obtainable through
/// [`Trace::as_view`], so the finiteness check carries over.
#[derive(Debug, Clone, Copy)]
pub struct TraceView<'a>(&'a [f64]);

impl<'a> TraceView<'a> {
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; a [`Trace`] holds at least one sample.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

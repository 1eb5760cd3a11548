//! Warping parameters: misfit norm, strain limit and sweep direction.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::error::WarpError;

/// Pointwise misfit norm used to build the error surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Norm {
    /// Squared difference.
    #[default]
    L2,
    /// Absolute difference.
    L1,
}

impl Norm {
    /// Misfit of a single sample difference under this norm.
    #[must_use]
    pub fn misfit(self, diff: f64) -> f64 {
        match self {
            Self::L2 => diff * diff,
            Self::L1 => diff.abs(),
        }
    }
}

impl FromStr for Norm {
    type Err = WarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l2" => Ok(Self::L2),
            "l1" => Ok(Self::L1),
            _ => Err(WarpError::UnknownNorm {
                selector: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::L2 => "l2",
            Self::L1 => "l1",
        })
    }
}

/// Time direction in which the distance surface is accumulated.
///
/// `Symmetric` accumulates in both directions and combines the two surfaces,
/// which smooths the distance surface without favouring either end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Accumulate forward in time, backtrack from the last sample.
    #[default]
    Forward,
    /// Accumulate backward in time, backtrack from the first sample.
    Backward,
    /// Accumulate both ways, backtrack the combined surface from the last sample.
    Symmetric,
}

impl FromStr for Direction {
    type Err = WarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "backward" => Ok(Self::Backward),
            "symmetric" => Ok(Self::Symmetric),
            _ => Err(WarpError::UnknownDirection {
                selector: s.to_string(),
            }),
        }
    }
}

/// Numeric convention: `1` forward, `-1` backward, `0` both.
impl TryFrom<i8> for Direction {
    type Error = WarpError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Forward),
            -1 => Ok(Self::Backward),
            0 => Ok(Self::Symmetric),
            _ => Err(WarpError::InvalidDirection { value }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Symmetric => "symmetric",
        })
    }
}

/// Strain limit `b`: the lag may change by at most one step per `b` samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strain(NonZeroUsize);

impl Strain {
    /// The loosest limit, one lag step per sample.
    pub const UNIT: Self = Self(NonZeroUsize::MIN);

    /// Create a strain limit.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::InvalidStrain`] if `b` is zero.
    pub fn new(b: usize) -> Result<Self, WarpError> {
        NonZeroUsize::new(b)
            .map(Self)
            .ok_or(WarpError::InvalidStrain { strain: b })
    }

    /// Return the number of samples per lag step.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Strain {
    fn default() -> Self {
        Self::UNIT
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Core types shared by the fraction estimators
//!
//! Every sampling model implements the [`TailBound`] trait, which turns a desired
//! minimum sample size into a per-element inclusion probability. The checked entry
//! points report bad input through [`FractionError`].

use core::fmt::Debug;

use crate::fraction::{SUCCESS_PROBABILITY, WITHOUT_REPLACEMENT_DELTA};

/// Error returned by the checked fraction entry points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractionError {
    /// Population size is zero, negative or not finite
    InvalidTotal(f64),
    /// Desired sample size is negative or not finite
    InvalidLowerBound(f64),
}

impl core::fmt::Display for FractionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FractionError::InvalidTotal(total) => {
                write!(f, "invalid population size: expected a finite value > 0, found {}", total)
            }
            FractionError::InvalidLowerBound(bound) => {
                write!(f, "invalid sample size: expected a finite value >= 0, found {}", bound)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FractionError {}

/// Statistical model of the downstream sampling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SamplingMode {
    /// Each element may be drawn several times (Poisson-rate trials)
    WithReplacement,
    /// Each element is drawn at most once (Bernoulli trials)
    #[default]
    WithoutReplacement,
}

impl SamplingMode {
    /// Whether this mode samples with replacement
    pub fn with_replacement(&self) -> bool {
        matches!(self, SamplingMode::WithReplacement)
    }

    /// Probability that a fraction computed for this mode yields a large enough sample
    pub fn success_probability(&self) -> f64 {
        match self {
            SamplingMode::WithReplacement => SUCCESS_PROBABILITY,
            SamplingMode::WithoutReplacement => 1.0 - WITHOUT_REPLACEMENT_DELTA,
        }
    }
}

impl From<bool> for SamplingMode {
    fn from(with_replacement: bool) -> Self {
        if with_replacement {
            SamplingMode::WithReplacement
        } else {
            SamplingMode::WithoutReplacement
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for SamplingMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            SamplingMode::WithReplacement => {
                serializer.serialize_unit_variant("SamplingMode", 0, "with_replacement")
            }
            SamplingMode::WithoutReplacement => {
                serializer.serialize_unit_variant("SamplingMode", 1, "without_replacement")
            }
        }
    }
}

/// A sampling fraction together with the request that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractionEstimate {
    /// Per-element inclusion probability
    pub fraction: f64,
    /// Minimum number of elements the caller asked for
    pub lower_bound: f64,
    /// Population size
    pub total: f64,
    /// Sampling model the fraction was computed for
    pub mode: SamplingMode,
}

impl FractionEstimate {
    /// Create a new estimate
    pub fn new(fraction: f64, lower_bound: f64, total: f64, mode: SamplingMode) -> Self {
        Self {
            fraction,
            lower_bound,
            total,
            mode,
        }
    }

    /// Mean number of elements the sampling pass will produce
    pub fn expected_sample_size(&self) -> f64 {
        self.fraction * self.total
    }

    /// Expected sample size relative to the requested minimum
    ///
    /// Returns 1.0 when nothing was requested and nothing is expected, and
    /// infinity when nothing was requested but elements are still expected.
    pub fn oversampling_ratio(&self) -> f64 {
        let expected = self.expected_sample_size();
        if self.lower_bound == 0.0 {
            if expected == 0.0 {
                1.0
            } else {
                f64::INFINITY
            }
        } else {
            expected / self.lower_bound
        }
    }

    /// Whether the sampling pass keeps every element
    pub fn is_full_scan(&self) -> bool {
        self.fraction >= 1.0
    }

    /// Probability that the sample contains at least `lower_bound` elements
    pub fn success_probability(&self) -> f64 {
        self.mode.success_probability()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for FractionEstimate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FractionEstimate", 4)?;
        state.serialize_field("fraction", &self.fraction)?;
        state.serialize_field("lower_bound", &self.lower_bound)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("mode", &self.mode)?;
        state.end()
    }
}

/// Tail-bound inversion for one sampling model
///
/// Implementations return a fraction `q` such that including each of `total`
/// elements independently at rate `q` yields at least `lower_bound` elements
/// with probability at least [`success_probability`](TailBound::success_probability).
pub trait TailBound: Copy + Debug {
    /// Inflate `lower_bound / total` into a safe per-element fraction
    fn upper_fraction(&self, lower_bound: f64, total: f64) -> f64;

    /// Guaranteed probability of reaching the requested sample size
    fn success_probability(&self) -> f64;
}

//! Top-level fraction estimation
//!
//! [`compute_fraction`] is the unchecked entry point used on the hot path;
//! [`try_compute_fraction`] validates its input first and returns a
//! [`FractionEstimate`] describing the result.

use crate::fraction::{BinomialBound, PoissonBound};
use crate::traits::{FractionError, FractionEstimate, SamplingMode, TailBound};

/// Per-element sampling fraction that yields at least `lower_bound` elements
/// out of `total` with probability at least 0.9999
///
/// - With replacement the Poisson rate bound is spread over `total`.
/// - Without replacement the naive fraction `lower_bound / total` is inflated
///   by the binomial bound with a fixed delta of `0.00001`.
///
/// # Preconditions
///
/// `total` must be positive and `lower_bound` a non-negative number. Nothing
/// is validated here, and the clamps in the bound functions hide some bad
/// input rather than letting it surface as a non-finite value:
///
/// - With replacement, a zero `total` returns `+inf`. A NaN `lower_bound` is
///   floored to [`MIN_POISSON_RATE`](crate::fraction::MIN_POISSON_RATE) before
///   the division, so the result looks like a valid tiny rate.
/// - Without replacement, a zero `total` or a NaN `lower_bound` returns `1.0`
///   ("sample everything"), because the final `min(1, ..)` swallows both
///   infinity and NaN.
///
/// Checking the result with `is_finite()` therefore does not detect bad input.
/// Use [`try_compute_fraction`] for untrusted input.
///
/// # Example
///
/// ```
/// use flowsample::fraction::compute_fraction;
///
/// assert!((compute_fraction(100.0, 10_000.0, true) - 0.016).abs() < 1e-12);
/// assert!(compute_fraction(100.0, 10_000.0, false) <= 1.0);
/// ```
pub fn compute_fraction(lower_bound: f64, total: f64, with_replacement: bool) -> f64 {
    if with_replacement {
        PoissonBound.upper_fraction(lower_bound, total)
    } else {
        BinomialBound::default().upper_fraction(lower_bound, total)
    }
}

/// Validate inputs, then compute the fraction for `mode`
///
/// # Errors
///
/// - [`FractionError::InvalidTotal`] if `total` is not finite or not positive
/// - [`FractionError::InvalidLowerBound`] if `lower_bound` is not finite or negative
///
/// # Example
///
/// ```
/// use flowsample::fraction::try_compute_fraction;
/// use flowsample::traits::{FractionError, SamplingMode};
///
/// let est = try_compute_fraction(100.0, 10_000.0, SamplingMode::WithReplacement).unwrap();
/// assert!((est.expected_sample_size() - 160.0).abs() < 1e-9);
///
/// let err = try_compute_fraction(100.0, 0.0, SamplingMode::WithReplacement).unwrap_err();
/// assert_eq!(err, FractionError::InvalidTotal(0.0));
/// ```
pub fn try_compute_fraction(
    lower_bound: f64,
    total: f64,
    mode: SamplingMode,
) -> Result<FractionEstimate, FractionError> {
    if !total.is_finite() || total <= 0.0 {
        log::debug!("rejecting fraction request: total={}", total);
        return Err(FractionError::InvalidTotal(total));
    }
    if !lower_bound.is_finite() || lower_bound < 0.0 {
        log::debug!("rejecting fraction request: lower_bound={}", lower_bound);
        return Err(FractionError::InvalidLowerBound(lower_bound));
    }

    Ok(FractionEstimator::new(mode).estimate(lower_bound, total))
}

/// Stateless fraction estimator bound to one sampling mode
///
/// Convenient when the mode is decided once and many requests follow, e.g. one
/// estimator per sampling operator.
///
/// # Example
///
/// ```
/// use flowsample::fraction::FractionEstimator;
///
/// let estimator = FractionEstimator::with_replacement();
/// let est = estimator.estimate(100.0, 10_000.0);
///
/// assert!((est.fraction - 0.016).abs() < 1e-12);
/// assert!(est.oversampling_ratio() > 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FractionEstimator {
    mode: SamplingMode,
}

impl FractionEstimator {
    /// Create an estimator for the given mode
    pub fn new(mode: SamplingMode) -> Self {
        Self { mode }
    }

    /// Estimator for sampling with replacement
    pub fn with_replacement() -> Self {
        Self::new(SamplingMode::WithReplacement)
    }

    /// Estimator for sampling without replacement
    pub fn without_replacement() -> Self {
        Self::new(SamplingMode::WithoutReplacement)
    }

    /// Get the sampling mode
    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// Per-element fraction; same preconditions as [`compute_fraction`]
    pub fn fraction(&self, lower_bound: f64, total: f64) -> f64 {
        compute_fraction(lower_bound, total, self.mode.with_replacement())
    }

    /// Fraction plus the request that produced it
    pub fn estimate(&self, lower_bound: f64, total: f64) -> FractionEstimate {
        let fraction = self.fraction(lower_bound, total);
        log::trace!(
            "fraction estimate: lower_bound={} total={} mode={:?} fraction={}",
            lower_bound,
            total,
            self.mode,
            fraction
        );
        if !self.mode.with_replacement() && fraction >= 1.0 {
            log::debug!(
                "fraction clamped to full scan: lower_bound={} total={}",
                lower_bound,
                total
            );
        }
        FractionEstimate::new(fraction, lower_bound, total, self.mode)
    }

    /// Checked variant of [`estimate`](Self::estimate)
    pub fn try_estimate(
        &self,
        lower_bound: f64,
        total: f64,
    ) -> Result<FractionEstimate, FractionError> {
        try_compute_fraction(lower_bound, total, self.mode)
    }
}

impl From<SamplingMode> for FractionEstimator {
    fn from(mode: SamplingMode) -> Self {
        Self::new(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::{upper_poisson_bound, MIN_POISSON_RATE};
    use test_log::test;

    #[test]
    fn test_with_replacement() {
        let fraction = compute_fraction(100.0, 10_000.0, true);
        assert!((fraction - upper_poisson_bound(100.0) / 10_000.0).abs() < 1e-15);
        assert!((fraction - 0.016).abs() < 1e-12);
    }

    #[test]
    fn test_without_replacement() {
        let fraction = compute_fraction(100.0, 10_000.0, false);
        assert!((fraction - 0.016087).abs() < 1e-5, "fraction = {}", fraction);
        assert!(fraction <= 1.0);
    }

    #[test]
    fn test_zero_request_floor() {
        let fraction = compute_fraction(0.0, 1000.0, true);
        assert!(fraction > 0.0);
        assert!((fraction - 1e-13).abs() < 1e-25);
    }

    #[test]
    fn test_integer_request() {
        let n: u64 = 100;
        let total: u64 = 10_000;
        assert_eq!(
            compute_fraction(n as f64, total as f64, true),
            compute_fraction(100.0, 10_000.0, true)
        );
    }

    #[test]
    fn test_zero_total_with_replacement() {
        assert_eq!(compute_fraction(10.0, 0.0, true), f64::INFINITY);
        assert_eq!(compute_fraction(0.0, 0.0, true), f64::INFINITY);
    }

    #[test]
    fn test_zero_total_without_replacement_is_full_scan() {
        // inf and NaN both collapse to 1.0 under the final clamp
        assert_eq!(compute_fraction(10.0, 0.0, false), 1.0);
        assert_eq!(compute_fraction(0.0, 0.0, false), 1.0);
    }

    #[test]
    fn test_nan_request_masked() {
        assert_eq!(compute_fraction(f64::NAN, 100.0, false), 1.0);

        let fraction = compute_fraction(f64::NAN, 100.0, true);
        assert!(fraction.is_finite());
        assert!((fraction - MIN_POISSON_RATE / 100.0).abs() < 1e-25);

        // The checked entry point is the one that catches these
        let mode = SamplingMode::WithoutReplacement;
        assert!(try_compute_fraction(10.0, 0.0, mode).is_err());
        assert!(try_compute_fraction(f64::NAN, 100.0, mode).is_err());
    }

    #[test]
    fn test_full_scan_estimate() {
        let est = FractionEstimator::without_replacement().estimate(50.0, 50.0);
        assert_eq!(est.fraction, 1.0);
        assert!(est.is_full_scan());
    }

    #[test]
    fn test_request_everything() {
        assert_eq!(compute_fraction(1000.0, 1000.0, false), 1.0);
    }

    #[test]
    fn test_try_compute_matches_unchecked() {
        for mode in [SamplingMode::WithReplacement, SamplingMode::WithoutReplacement] {
            let est = try_compute_fraction(250.0, 1e6, mode).unwrap();
            assert_eq!(est.fraction, compute_fraction(250.0, 1e6, mode.with_replacement()));
            assert_eq!(est.mode, mode);
            assert_eq!(est.lower_bound, 250.0);
            assert_eq!(est.total, 1e6);
        }
    }

    #[test]
    fn test_try_compute_rejects_bad_total() {
        let mode = SamplingMode::WithoutReplacement;
        assert_eq!(
            try_compute_fraction(1.0, 0.0, mode),
            Err(FractionError::InvalidTotal(0.0))
        );
        assert_eq!(
            try_compute_fraction(1.0, -5.0, mode),
            Err(FractionError::InvalidTotal(-5.0))
        );
        assert!(matches!(
            try_compute_fraction(1.0, f64::NAN, mode),
            Err(FractionError::InvalidTotal(_))
        ));
        assert_eq!(
            try_compute_fraction(1.0, f64::INFINITY, mode),
            Err(FractionError::InvalidTotal(f64::INFINITY))
        );
    }

    #[test]
    fn test_try_compute_rejects_bad_lower_bound() {
        let mode = SamplingMode::WithReplacement;
        assert_eq!(
            try_compute_fraction(-1.0, 100.0, mode),
            Err(FractionError::InvalidLowerBound(-1.0))
        );
        assert!(matches!(
            try_compute_fraction(f64::NAN, 100.0, mode),
            Err(FractionError::InvalidLowerBound(_))
        ));
    }

    #[test]
    fn test_estimator() {
        let estimator = FractionEstimator::without_replacement();
        assert_eq!(estimator.mode(), SamplingMode::WithoutReplacement);
        assert_eq!(FractionEstimator::default(), estimator);

        let est = estimator.estimate(100.0, 10_000.0);
        assert_eq!(est.fraction, compute_fraction(100.0, 10_000.0, false));
        assert!(est.expected_sample_size() > 100.0);
        assert!(!est.is_full_scan());

        let est = FractionEstimator::from(SamplingMode::WithReplacement).estimate(0.0, 1000.0);
        assert_eq!(est.fraction, compute_fraction(0.0, 1000.0, true));
    }

    #[test]
    fn test_try_estimate() {
        let estimator = FractionEstimator::with_replacement();
        assert!(estimator.try_estimate(10.0, 100.0).is_ok());
        assert!(estimator.try_estimate(10.0, 0.0).is_err());
    }
}

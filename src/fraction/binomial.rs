//! Binomial tail bound for sampling without replacement

use crate::fraction::WITHOUT_REPLACEMENT_DELTA;
use crate::math;
use crate::traits::TailBound;

/// Inflate a naive fraction so a `Binomial(total, q)` draw reaches `fraction * total`
/// with probability at least `1 - delta`
///
/// Uses `gamma = -ln(delta) / total` and returns
/// `min(1, fraction + gamma + sqrt(gamma^2 + 2 * gamma * fraction))`.
///
/// `f64::min` ignores a NaN operand, so a zero `total` (infinite `gamma`) or a
/// NaN `fraction` returns `1.0` rather than a non-finite value.
///
/// # Example
///
/// ```
/// use flowsample::fraction::upper_binomial_bound;
///
/// let q = upper_binomial_bound(0.00001, 10_000.0, 0.01);
/// assert!(q > 0.01 && q < 0.017);
///
/// // Tiny populations need everything
/// assert_eq!(upper_binomial_bound(0.00001, 3.0, 0.5), 1.0);
/// ```
pub fn upper_binomial_bound(delta: f64, total: f64, fraction: f64) -> f64 {
    let gamma = -math::ln(delta) / total;
    let adjusted = fraction + gamma + math::sqrt(gamma * gamma + 2.0 * gamma * fraction);
    adjusted.min(1.0)
}

/// Sampling without replacement
///
/// Each element is kept by an independent Bernoulli trial with probability `q`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialBound {
    delta: f64,
}

impl Default for BinomialBound {
    fn default() -> Self {
        Self::new(WITHOUT_REPLACEMENT_DELTA)
    }
}

impl BinomialBound {
    /// Create a bound with the given failure probability
    ///
    /// # Panics
    ///
    /// Panics if delta is not in (0, 1)
    pub fn new(delta: f64) -> Self {
        assert!(delta > 0.0 && delta < 1.0, "delta must be in (0, 1)");
        Self { delta }
    }

    /// Failure probability of this bound
    pub fn delta(&self) -> f64 {
        self.delta
    }
}

impl TailBound for BinomialBound {
    fn upper_fraction(&self, lower_bound: f64, total: f64) -> f64 {
        upper_binomial_bound(self.delta, total, lower_bound / total)
    }

    fn success_probability(&self) -> f64 {
        1.0 - self.delta
    }
}

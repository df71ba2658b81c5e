//! Poisson tail bound for sampling with replacement

use crate::fraction::{MIN_POISSON_RATE, SUCCESS_PROBABILITY};
use crate::math;
use crate::traits::TailBound;

/// Standard-deviation multipliers by request size, checked in order
///
/// The normal approximation to the Poisson tail is loose for small rates, so
/// small requests get more standard deviations of headroom.
const NUM_STD_TIERS: [(f64, f64); 2] = [(6.0, 12.0), (16.0, 9.0)];

/// Multiplier used once the request reaches the last tier threshold
const NUM_STD_LARGE: f64 = 6.0;

/// Number of standard deviations added on top of `bound`
///
/// - `bound < 6`: 12
/// - `6 <= bound < 16`: 9
/// - `bound >= 16`: 6
pub fn poisson_num_std(bound: f64) -> f64 {
    NUM_STD_TIERS
        .iter()
        .find(|&&(threshold, _)| bound < threshold)
        .map_or(NUM_STD_LARGE, |&(_, num_std)| num_std)
}

/// Upper bound on the Poisson rate `λ` such that `Pr[Poisson(λ) >= bound] >= 0.9999`
///
/// Computes `bound + num_std * sqrt(bound)` and floors the result at
/// [`MIN_POISSON_RATE`]. `f64::max` ignores a NaN operand, so a NaN `bound`
/// also returns [`MIN_POISSON_RATE`].
///
/// # Example
///
/// ```
/// use flowsample::fraction::upper_poisson_bound;
///
/// assert_eq!(upper_poisson_bound(100.0), 160.0);
/// assert!(upper_poisson_bound(0.0) > 0.0);
/// ```
pub fn upper_poisson_bound(bound: f64) -> f64 {
    let num_std = poisson_num_std(bound);
    (bound + num_std * math::sqrt(bound)).max(MIN_POISSON_RATE)
}

/// Sampling with replacement
///
/// Each element is drawn `Poisson(q)` times; the rate is the Poisson bound on
/// the requested count spread over the population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoissonBound;

impl TailBound for PoissonBound {
    fn upper_fraction(&self, lower_bound: f64, total: f64) -> f64 {
        upper_poisson_bound(lower_bound) / total
    }

    fn success_probability(&self) -> f64 {
        SUCCESS_PROBABILITY
    }
}

//! Sampling-fraction estimation
//!
//! Converts a desired minimum sample size into a per-element inclusion
//! probability. Workers can then keep each element independently at that rate,
//! with no coordination and no second pass, and still end up with at least the
//! requested number of elements with very high probability.
//!
//! # Models
//!
//! - [`PoissonBound`]: sampling with replacement, normal approximation to the
//!   Poisson tail with an empirically tuned number of standard deviations
//! - [`BinomialBound`]: sampling without replacement, Chernoff-style inversion
//!   of the binomial tail
//!
//! # Example
//!
//! ```
//! use flowsample::fraction::compute_fraction;
//!
//! // Want at least 100 rows out of 10,000, sampling with replacement
//! let fraction = compute_fraction(100.0, 10_000.0, true);
//! assert!((fraction - 0.016).abs() < 1e-12);
//!
//! // Without replacement the binomial bound is used instead
//! let fraction = compute_fraction(100.0, 10_000.0, false);
//! assert!(fraction > 0.01 && fraction < 0.017);
//! ```

mod binomial;
mod estimator;
mod poisson;

pub use binomial::{upper_binomial_bound, BinomialBound};
pub use estimator::{compute_fraction, try_compute_fraction, FractionEstimator};
pub use poisson::{poisson_num_std, upper_poisson_bound, PoissonBound};

/// Target probability of getting at least the requested sample size
pub const SUCCESS_PROBABILITY: f64 = 0.9999;

/// Failure probability used by [`compute_fraction`] when sampling without replacement
pub const WITHOUT_REPLACEMENT_DELTA: f64 = 0.00001;

/// Smallest Poisson rate ever returned, so a zero request never yields a zero rate
pub const MIN_POISSON_RATE: f64 = 1e-10;

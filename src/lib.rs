//! # Flowsample
//!
//! Sampling-fraction estimation for single-pass distributed sampling.
//!
//! Given a dataset whose size is known but whose elements cannot be cheaply
//! indexed, Flowsample turns "I need at least `n` elements" into a per-element
//! inclusion probability. Every partition can then run its own independent
//! Bernoulli (or Poisson) trials with that probability and, with probability
//! at least 99.99%, the combined sample holds at least `n` elements. No second
//! pass is needed to top up an undersized sample.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowsample::prelude::*;
//!
//! // 1,000 rows out of 10 million, each row kept at most once
//! let fraction = compute_fraction(1_000.0, 10_000_000.0, false);
//! assert!(fraction > 1e-4 && fraction < 2e-4);
//!
//! // Typed API with a description of the result
//! let est = FractionEstimator::with_replacement().estimate(1_000.0, 10_000_000.0);
//! println!("keep rate {}, expect ~{} rows", est.fraction, est.expected_sample_size());
//! ```
//!
//! ## Distributed Computing
//!
//! The fraction is computed once, typically on the coordinating node, and
//! broadcast to the workers. Flowsample never draws random numbers itself.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Enable serialization of [`SamplingMode`](traits::SamplingMode)
//!   and [`FractionEstimate`](traits::FractionEstimate)

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod fraction;
pub mod traits;

mod math;

pub mod prelude {
    pub use crate::fraction::{
        compute_fraction, try_compute_fraction, upper_binomial_bound, upper_poisson_bound,
        BinomialBound, FractionEstimator, PoissonBound,
    };
    pub use crate::traits::*;
}

pub use fraction::{compute_fraction, try_compute_fraction, FractionEstimator};
pub use traits::{FractionError, FractionEstimate, SamplingMode};

//! monte_carlo — seeded sampling and Monte Carlo estimation.
//!
//! Purpose
//! -------
//! Draw independent samples from validated distributions and turn them into
//! point estimates with Monte Carlo standard errors: expectations, event and
//! interval probabilities, definite integrals, and payoffs of path-dependent
//! games.
//!
//! Key behaviors
//! -------------
//! - [`SimRng`]: explicit, reproducible PCG64 streams keyed by
//!   `(master_seed, stream)`.
//! - [`VariateSource`]: normal, uniform, binomial, and weighted categorical
//!   families, validated at construction.
//! - [`estimate_with`] and friends: Welford-accumulated sample means with
//!   standard errors and 95 % intervals.
//! - [`SpinGame`] / [`evaluate_path`]: running-sum payoffs with the bust rule.
//!
//! Invariants & assumptions
//! ------------------------
//! - No global generator exists; every sampling call takes `&mut R: Rng`.
//! - Validation always precedes drawing, so an error never leaves a generator
//!   partially advanced.
//!
//! Testing notes
//! -------------
//! - Statistical assertions use a fixed seed and a 5-standard-error band.
//! - `proptest` covers the bust rule and weighted-draw support.

pub mod errors;
pub mod estimator;
pub mod paths;
pub mod rng;
pub mod variates;

pub use self::errors::{McError, McResult};
pub use self::estimator::{
    Estimate, estimate_interval_probability, estimate_mean, estimate_probability, estimate_with,
    integrate, normal_interval_probability,
};
pub use self::paths::{PathPolicy, SpinGame, evaluate_path, running_sums};
pub use self::rng::SimRng;
pub use self::variates::VariateSource;

pub mod prelude {
    pub use super::errors::{McError, McResult};
    pub use super::estimator::{Estimate, estimate_interval_probability, estimate_mean, integrate};
    pub use super::paths::{PathPolicy, SpinGame};
    pub use super::rng::SimRng;
    pub use super::variates::VariateSource;
}

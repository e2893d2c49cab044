//! simulation — replicate studies of estimator accuracy.
//!
//! Purpose
//! -------
//! Measure how Monte Carlo estimates and fitted parameters behave across a
//! grid of configurations (sample sizes, noise variances) by repeating each
//! configuration many times with independent randomness.
//!
//! Key behaviors
//! -------------
//! - [`run_study`] / [`run_study_parallel`]: the generic grid × replicate
//!   driver, producing a [`StudyTable`] of outcomes with mean and standard
//!   deviation per grid point.
//! - [`LinearSimConfig`] with [`simulate_linear`] and [`simulate_and_fit`]:
//!   the regression data-generating process.
//! - Ready-made studies: [`slope_study_over_sigma2`], [`slope_study_over_n`],
//!   [`variance_mle_study`], [`interval_error_study`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Every replicate gets its own generator stream; results are reproducible
//!   from `(seed, grid index, replicate)` alone and do not depend on thread
//!   count.
//! - Configurations are plain values built per run; no study reads state
//!   left behind by another.
//!
//! Testing notes
//! -------------
//! - Unit tests check ordering, stream assignment, and error propagation.
//! - Integration tests check error decay with sample size and the absence of
//!   correlation between replicate streams.

pub mod errors;
pub mod harness;
pub mod regression;
pub mod summary;

pub use self::errors::{SimulationError, SimulationResult};
pub use self::harness::{GridRow, StudyConfig, StudyTable, run_study, run_study_parallel};
pub use self::regression::{
    LinearSimConfig, interval_error_study, simulate_and_fit, simulate_linear, slope_study_over_n,
    slope_study_over_sigma2, variance_mle_study,
};
pub use self::summary::{mean, pearson_correlation, std_dev};

pub mod prelude {
    pub use super::errors::{SimulationError, SimulationResult};
    pub use super::harness::{StudyConfig, StudyTable, run_study, run_study_parallel};
    pub use super::regression::LinearSimConfig;
}

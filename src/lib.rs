//! rust_simstats — Monte Carlo estimation and maximum-likelihood fitting.
//!
//! Purpose
//! -------
//! Provide the computational core of a statistics practical: seeded random
//! variates, Monte Carlo estimators with standard errors, Gaussian negative
//! log-likelihoods minimized under box constraints, and a harness that repeats
//! simulate-and-estimate cycles over a configuration grid.
//!
//! Key behaviors
//! -------------
//! - [`monte_carlo`]: reproducible generator streams, validated distribution
//!   families, sample-mean estimators, and path-dependent games.
//! - [`likelihood`]: normal and simple-regression negative log-likelihoods
//!   with analytic gradients, plus surface evaluation.
//! - [`optimization`]: bounded L-BFGS minimization via argmin with
//!   non-convergence surfaced as an error.
//! - [`inference`]: observed-information standard errors at an MLE.
//! - [`simulation`]: grid × replicate studies, sequential or rayon-parallel.
//!
//! Invariants & assumptions
//! ------------------------
//! - There is no global generator or ambient dataset. Generators and data are
//!   passed explicitly to every call.
//! - Invalid input is reported through each module's error enum and never
//!   clamped or defaulted.
//!
//! Conventions
//! -----------
//! - Parameter vectors are `ndarray::Array1<f64>` in model space.
//! - Objectives are negative log-likelihoods and are minimized.
//! - Variances, not standard deviations, parameterize likelihoods; standard
//!   deviations parameterize samplers.
//!
//! Downstream usage
//! ----------------
//! - Reporting layers consume [`monte_carlo::Estimate`],
//!   [`optimization::minimizer::OptimOutcome`], and
//!   [`simulation::StudyTable`], all plain data.
//! - `use rust_simstats::prelude::*` brings the common entry points into
//!   scope.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; `tests/` holds end-to-end checks of
//!   consistency, determinism, likelihood correctness, and replicate
//!   independence.

pub mod inference;
pub mod likelihood;
pub mod monte_carlo;
pub mod optimization;
pub mod simulation;

pub mod prelude {
    pub use crate::inference::prelude::*;
    pub use crate::likelihood::prelude::*;
    pub use crate::monte_carlo::prelude::*;
    pub use crate::optimization::prelude::*;
    pub use crate::simulation::prelude::*;
}

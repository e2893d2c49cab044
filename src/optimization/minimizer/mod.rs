//! minimizer — bounded, argmin-powered negative log-likelihood minimizer.
//!
//! Purpose
//! -------
//! Fit maximum-likelihood estimates by minimizing a user-supplied negative
//! log-likelihood subject to per-parameter box constraints. Callers
//! implement [`NegLogLikelihood`] and call [`minimize`] with a starting
//! point, the dataset, [`Bounds`], and [`MLEOptions`].
//!
//! Key behaviors
//! -------------
//! - [`bounds`] maps the open box onto `ℝⁿ` so L-BFGS runs unconstrained
//!   while the evaluator only ever sees admissible points.
//! - [`adapter::ArgMinAdapter`] exposes `z ↦ NLL(θ(z))` and its gradient to
//!   argmin, chain-ruling analytic gradients or finite-differencing the
//!   composite cost.
//! - [`builders`] construct L-BFGS with the chosen line search and
//!   [`run::run_lbfgs`] executes it.
//! - Only genuine convergence yields an [`OptimOutcome`]; exhausting the
//!   iteration budget is [`crate::optimization::errors::OptError::NonConvergence`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is minimized as given; nothing in this module flips signs.
//! - Evaluators return `+∞` outside their support and errors for malformed
//!   input; neither may panic.
//! - `theta_hat` in every outcome is a model-space point inside the bounds.
//!
//! Conventions
//! -----------
//! - Model-space vectors are called `theta`; optimizer-space vectors `z`.
//!   Both use the [`Theta`] alias.
//! - Analytic gradients from [`NegLogLikelihood::grad`] are with respect to
//!   `theta`; the adapter owns the conversion to `z`.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover transforms, gradient agreement, solver wiring,
//!   and validation rules.
//! - [`api`] tests and the crate's integration tests run full solves on
//!   small quadratic and Gaussian problems.

pub mod adapter;
pub mod api;
pub mod bounds;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::bounds::Bounds;
pub use self::traits::{LineSearcher, MLEOptions, NegLogLikelihood, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::bounds::Bounds;
    pub use super::traits::{LineSearcher, MLEOptions, NegLogLikelihood, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}

//! optimization — bounded MLE stack, numerical helpers, and error surface.
//!
//! Purpose
//! -------
//! Group everything needed to turn a negative log-likelihood into a fitted
//! parameter vector: the argmin-backed [`minimizer`], the smooth transforms
//! in [`numerical_stability`] that implement box constraints, and the shared
//! [`errors::OptError`] surface.
//!
//! Key behaviors
//! -------------
//! - [`minimizer::minimize`] runs L-BFGS over a box-constrained parameter
//!   space and reports only converged solutions.
//! - Backend failures, evaluator errors, and configuration mistakes all
//!   surface as [`errors::OptError`].
//!
//! Conventions
//! -----------
//! - Objectives are negative log-likelihoods and are minimized directly.
//! - Fallible entry points return [`errors::OptResult`]; raw argmin errors
//!   never leave this module.
//! - Logging goes through `tracing`; this module installs no subscriber.
//!
//! Downstream usage
//! ----------------
//! - [`crate::likelihood`] implements [`minimizer::NegLogLikelihood`] for the
//!   Gaussian models and [`crate::simulation`] drives [`minimizer::minimize`]
//!   inside repeated-sampling studies.
//! - Front-ends typically `use rust_simstats::optimization::prelude::*`.

pub mod errors;
pub mod minimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}

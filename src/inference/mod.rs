//! inference — post-estimation uncertainty for fitted likelihoods.
//!
//! Purpose
//! -------
//! Quantify the sampling uncertainty of a maximum-likelihood estimate from
//! the curvature of the negative log-likelihood at the optimum.
//!
//! Key behaviors
//! -------------
//! - [`observed_information`] builds `J(θ̂) = ∇²NLL(θ̂)` from the analytic
//!   gradient when the evaluator has one, otherwise from NLL values.
//! - [`mle_standard_errors`] converts `J(θ̂)` into per-parameter SEs through
//!   an eigen pseudo-inverse.
//!
//! Conventions
//! -----------
//! - `θ̂` is in model space, exactly as returned in
//!   [`OptimOutcome::theta_hat`](crate::optimization::minimizer::OptimOutcome).
//! - Failures are [`OptError`](crate::optimization::errors::OptError) values.

pub mod hessian;

pub use self::hessian::{mle_standard_errors, observed_information};

pub mod prelude {
    pub use super::hessian::{mle_standard_errors, observed_information};
}

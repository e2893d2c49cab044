//! likelihood — Gaussian negative log-likelihood evaluators.
//!
//! Purpose
//! -------
//! Implement [`NegLogLikelihood`](crate::optimization::minimizer::NegLogLikelihood)
//! for the models used in the practicals and offer grid evaluation for
//! inspecting a likelihood surface directly.
//!
//! Key behaviors
//! -------------
//! - [`NormalMeanNll`]: mean of a normal sample with known variance.
//! - [`NormalNll`]: joint `(μ, σ²)` of a normal sample.
//! - [`GaussianRegressionNll`]: `(β₀, β₁, σ²)` of a simple linear regression,
//!   with the closed-form [`fit_ols`] alongside.
//! - [`evaluate_surface`]: `NLL` over a two-parameter grid.
//!
//! Invariants & assumptions
//! ------------------------
//! - Evaluators hold no observations; data is passed to every call and never
//!   mutated, so repeated evaluation is deterministic and re-entrant.
//! - Out-of-support parameters yield `+∞`; malformed input yields an
//!   [`OptError`](crate::optimization::errors::OptError).
//!
//! Testing notes
//! -------------
//! - Unit tests compare values with closed forms and analytic gradients
//!   with central differences.
//! - Integration tests minimize these objectives and compare against the
//!   sample mean and population variance.

pub mod normal;
pub mod regression;
pub mod surface;

pub use self::normal::{NormalMeanNll, NormalNll};
pub use self::regression::{GaussianRegressionNll, OlsFit, RegressionData, fit_ols};
pub use self::surface::{LikelihoodSurface, evaluate_surface};

pub mod prelude {
    pub use super::normal::{NormalMeanNll, NormalNll};
    pub use super::regression::{GaussianRegressionNll, RegressionData, fit_ols};
    pub use super::surface::evaluate_surface;
}

//! numerical_stability — stable scalar transforms for bounded optimization.
//!
//! Purpose
//! -------
//! Collect numerically stable scalar transforms that map unconstrained
//! optimizer coordinates into bounded model parameters, plus the small
//! tolerances shared by the optimizer and inference layers.
//!
//! Key behaviors
//! -------------
//! - Provide `safe_softplus` / `safe_softplus_inv` for one-sided bounds and
//!   `safe_logistic` / `safe_logit` for two-sided bounds.
//! - Centralize `EIGEN_EPS` and `LOGIT_EPS` so pseudo-inverse truncation and
//!   logit clamping agree across modules.
//!
//! Conventions
//! -----------
//! - Pure `f64 -> f64` helpers; no I/O, logging, or global state.
//! - Domain validation (positivity, ordering of bounds) happens in
//!   `minimizer::bounds`, not here.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, LOGIT_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
    };
}

//! minimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the bounded
//! minimizer so the rest of the optimization code stays agnostic to
//! `ndarray` and argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors with one entry per free parameter.
//! - `Cost` is always a negative log-likelihood value; no sign flips happen
//!   anywhere in the minimizer.
//! - The line-search aliases assume argmin's three-parameter forms
//!   `(Param, Gradient, Float)` as of the pinned argmin version.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` (model space) or `z` (optimizer space).
pub type Theta = Array1<f64>;

/// Gradient vector matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value: a negative log-likelihood.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver
/// (e.g. `"cost_count"`, `"gradient_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

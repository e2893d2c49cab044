//! Numerical stability utilities.
//!
//! Provides safe implementations of the scalar transforms used to map an
//! unconstrained optimizer coordinate `z ∈ ℝ` onto a bounded model
//! parameter. Each transform uses an explicit cutoff (`|x| > 20.0`) to keep
//! `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`safe_softplus`] / [`safe_softplus_inv`]: `ℝ ↔ (0, ∞)` without
//!   overflow or catastrophic cancellation.
//! - [`safe_logistic`] / [`safe_logit`]: `ℝ ↔ (0, 1)` with symmetric tail
//!   handling.
//! - [`EIGEN_EPS`]: eigenvalue floor for pseudo-inverses of observed
//!   information matrices.
//! - [`LOGIT_EPS`]: clamp margin keeping logit inputs strictly inside (0, 1).

/// Eigenvalues at or below this threshold are treated as zero when forming
/// pseudo-inverses of observed information matrices.
pub const EIGEN_EPS: f64 = 1e-10;

/// Margin used to keep probabilities strictly inside `(0, 1)` before a
/// logit is taken.
pub const LOGIT_EPS: f64 = 1e-12;

/// Cutoff beyond which the softplus/logistic tails are evaluated with their
/// asymptotic forms.
const TAIL_CUTOFF: f64 = 20.0;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > TAIL_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: returns `t = ln(exp(x) - 1)`.
///
/// `x` must be finite and `> 0`; callers validate this before mapping a
/// model-space parameter back into optimizer space.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > TAIL_CUTOFF { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic: `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates `exp` only on non-positive arguments so neither tail
/// overflows. This is also the derivative of [`safe_softplus`].
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of [`safe_logistic`] on `(0, 1)`: `logit(p) = ln(p) - ln(1 - p)`.
///
/// The input is clamped to `[LOGIT_EPS, 1 - LOGIT_EPS]`.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

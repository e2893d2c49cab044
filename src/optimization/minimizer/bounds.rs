//! minimizer::bounds — box constraints via smooth reparameterization.
//!
//! Purpose
//! -------
//! Express per-parameter box constraints `lᵢ < θᵢ < uᵢ` (either side may be
//! absent) as a smooth bijection between an unconstrained optimizer vector
//! `z ∈ ℝⁿ` and the open box. L-BFGS then runs on `z`, so the evaluator is
//! never queried outside the declared bounds.
//!
//! Key behaviors
//! -------------
//! - Free: `θ = z`.
//! - Lower only: `θ = l + softplus(z)`.
//! - Upper only: `θ = u − softplus(z)`.
//! - Both: `θ = l + (u − l)·σ(z)`.
//! - [`Bounds::jacobian_diag`] returns `dθᵢ/dzᵢ` for chain-ruling analytic
//!   gradients into optimizer space.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower.len() == upper.len()`; finite bounds satisfy `l < u`.
//! - Infinite bound values are normalized to "absent".
//! - The initial point must lie strictly inside the box; points on a bound
//!   have no finite preimage.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::types::Theta,
    numerical_stability::{safe_logistic, safe_logit, safe_softplus, safe_softplus_inv},
};

/// Per-coordinate constraint kind.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Free,
    Lower(f64),
    Upper(f64),
    Both(f64, f64),
}

/// Per-parameter lower/upper bounds for [`crate::optimization::minimizer::minimize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<Option<f64>>,
    upper: Vec<Option<f64>>,
}

impl Bounds {
    /// Construct validated bounds.
    ///
    /// # Errors
    /// - [`OptError::InvalidArgument`] if the two vectors differ in length.
    /// - [`OptError::InvalidBounds`] if a NaN bound is given or `l >= u`.
    pub fn new(lower: Vec<Option<f64>>, upper: Vec<Option<f64>>) -> OptResult<Self> {
        if lower.len() != upper.len() {
            return Err(OptError::InvalidArgument {
                reason: format!(
                    "lower bounds have length {}, upper bounds have length {}",
                    lower.len(),
                    upper.len()
                ),
            });
        }
        let normalize = |b: Option<f64>| b.filter(|v| !v.is_infinite());
        let lower: Vec<Option<f64>> = lower.into_iter().map(normalize).collect();
        let upper: Vec<Option<f64>> = upper.into_iter().map(normalize).collect();
        for (index, (lo, hi)) in lower.iter().zip(upper.iter()).enumerate() {
            let l = lo.unwrap_or(f64::NEG_INFINITY);
            let u = hi.unwrap_or(f64::INFINITY);
            if l.is_nan() || u.is_nan() || l >= u {
                return Err(OptError::InvalidBounds { index, lower: l, upper: u });
            }
        }
        Ok(Self { lower, upper })
    }

    /// No constraints on any of the `dim` parameters.
    pub fn unbounded(dim: usize) -> Self {
        Self { lower: vec![None; dim], upper: vec![None; dim] }
    }

    /// Number of parameters covered.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[Option<f64>] {
        &self.lower
    }

    pub fn upper(&self) -> &[Option<f64>] {
        &self.upper
    }

    fn side(&self, i: usize) -> Side {
        match (self.lower[i], self.upper[i]) {
            (None, None) => Side::Free,
            (Some(l), None) => Side::Lower(l),
            (None, Some(u)) => Side::Upper(u),
            (Some(l), Some(u)) => Side::Both(l, u),
        }
    }

    /// Check that `theta` has the right length and lies strictly inside.
    ///
    /// The box is open: `θᵢ == lᵢ` or `θᵢ == uᵢ` fails just like a point
    /// outside it.
    ///
    /// # Errors
    /// - [`OptError::InvalidArgument`] on length mismatch.
    /// - [`OptError::InitialPointOutOfBounds`] for the first offending entry.
    pub fn check_interior(&self, theta: &Theta) -> OptResult<()> {
        if theta.len() != self.dim() {
            return Err(OptError::InvalidArgument {
                reason: format!(
                    "initial point has length {}, bounds have length {}",
                    theta.len(),
                    self.dim()
                ),
            });
        }
        for (index, &value) in theta.iter().enumerate() {
            let inside = value.is_finite()
                && self.lower[index].map_or(true, |l| value > l)
                && self.upper[index].map_or(true, |u| value < u);
            if !inside {
                return Err(OptError::InitialPointOutOfBounds { index, value });
            }
        }
        Ok(())
    }

    /// Map a model-space point into optimizer space.
    ///
    /// # Errors
    /// Propagates [`Bounds::check_interior`] failures.
    pub fn to_unconstrained(&self, theta: &Theta) -> OptResult<Theta> {
        self.check_interior(theta)?;
        Ok(Theta::from_iter(theta.iter().enumerate().map(|(i, &x)| match self.side(i) {
            Side::Free => x,
            Side::Lower(l) => safe_softplus_inv(x - l),
            Side::Upper(u) => safe_softplus_inv(u - x),
            Side::Both(l, u) => safe_logit((x - l) / (u - l)),
        })))
    }

    /// Map an optimizer-space point into the model-space box.
    pub fn to_model(&self, z: &Theta) -> Theta {
        Theta::from_iter(z.iter().enumerate().map(|(i, &zi)| match self.side(i) {
            Side::Free => zi,
            Side::Lower(l) => l + safe_softplus(zi),
            Side::Upper(u) => u - safe_softplus(zi),
            Side::Both(l, u) => l + (u - l) * safe_logistic(zi),
        }))
    }

    /// Diagonal Jacobian `dθᵢ/dzᵢ` evaluated at `z`.
    pub fn jacobian_diag(&self, z: &Theta) -> Theta {
        Theta::from_iter(z.iter().enumerate().map(|(i, &zi)| match self.side(i) {
            Side::Free => 1.0,
            Side::Lower(_) => safe_logistic(zi),
            Side::Upper(_) => -safe_logistic(zi),
            Side::Both(l, u) => {
                let s = safe_logistic(zi);
                (u - l) * s * (1.0 - s)
            }
        }))
    }
}

//! likelihood::normal — Gaussian negative log-likelihoods for i.i.d. samples.
//!
//! Purpose
//! -------
//! Provide the two textbook Gaussian objectives: the mean with a known
//! variance ([`NormalMeanNll`]) and the joint mean/variance model
//! ([`NormalNll`]). Both are stateless with respect to data; observations
//! arrive as an explicit `&Array1<f64>` on every call.
//!
//! Key behaviors
//! -------------
//! - `value` is `-Σ ln φ(xᵢ; μ, σ²)` computed through `statrs`.
//! - A non-positive or non-finite variance is outside the support and
//!   yields `+∞`, never an error or a clamp.
//! - Analytic gradients are provided, so the minimizer never falls back to
//!   finite differences for these models.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are non-empty and finite; `check` enforces this once
//!   before optimization.
//! - Parameter order for [`NormalNll`] is `(μ, σ²)`.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Cost, Grad, NegLogLikelihood, Theta,
        validation::{validate_observations, validate_theta_len},
    },
};
use ndarray::{Array1, array};
use statrs::distribution::{Continuous, Normal};

/// Negative log-likelihood of the mean `μ` of `N(μ, σ²)` with `σ²` fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalMeanNll {
    variance: f64,
}

impl NormalMeanNll {
    /// # Errors
    /// [`OptError::InvalidParameter`] unless `variance` is finite and `> 0`.
    pub fn new(variance: f64) -> OptResult<Self> {
        if !variance.is_finite() || variance <= 0.0 {
            return Err(OptError::InvalidParameter {
                index: 0,
                value: variance,
                reason: "Known variance must be finite and strictly positive.",
            });
        }
        Ok(Self { variance })
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl NegLogLikelihood for NormalMeanNll {
    type Data = Array1<f64>;

    fn dim(&self) -> usize {
        1
    }

    fn value(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Cost> {
        validate_theta_len(theta, 1)?;
        let mean = theta[0];
        gaussian_nll(data, |_| mean, self.variance, 0)
    }

    fn check(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<()> {
        validate_theta_len(theta, 1)?;
        validate_observations(data)?;
        check_finite_entries(theta)
    }

    fn grad(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Grad> {
        validate_theta_len(theta, 1)?;
        let mean = theta[0];
        let resid_sum: f64 = data.iter().map(|&x| x - mean).sum();
        Ok(array![-resid_sum / self.variance])
    }
}

/// Joint negative log-likelihood of `θ = (μ, σ²)` under `N(μ, σ²)`.
///
/// The minimizer is the sample mean and the population (divide-by-`n`)
/// variance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalNll;

impl NegLogLikelihood for NormalNll {
    type Data = Array1<f64>;

    fn dim(&self) -> usize {
        2
    }

    fn value(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Cost> {
        validate_theta_len(theta, 2)?;
        let mean = theta[0];
        gaussian_nll(data, |_| mean, theta[1], 1)
    }

    /// Requires finite entries; a non-positive variance is left to `value`.
    fn check(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<()> {
        validate_theta_len(theta, 2)?;
        validate_observations(data)?;
        check_finite_entries(theta)
    }

    fn grad(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Grad> {
        validate_theta_len(theta, 2)?;
        let (mean, variance) = (theta[0], theta[1]);
        if !variance.is_finite() || variance <= 0.0 {
            return Err(OptError::InvalidParameter {
                index: 1,
                value: variance,
                reason: "Variance must be finite and strictly positive.",
            });
        }
        let n = data.len() as f64;
        let (resid_sum, sq_sum) = data.iter().fold((0.0, 0.0), |(s, q), &x| {
            let r = x - mean;
            (s + r, q + r * r)
        });
        Ok(array![
            -resid_sum / variance,
            n / (2.0 * variance) - sq_sum / (2.0 * variance * variance)
        ])
    }
}

// ---- Helper methods ----

/// `-Σ ln φ(xᵢ - mean(i); 0, variance)`, or `+∞` when `variance` is outside
/// `(0, ∞)`. `variance_index` labels the parameter in error reports.
pub(crate) fn gaussian_nll<M: Fn(usize) -> f64>(
    observations: &Array1<f64>, mean: M, variance: f64, variance_index: usize,
) -> OptResult<Cost> {
    if !variance.is_finite() || variance <= 0.0 {
        return Ok(f64::INFINITY);
    }
    let normal = Normal::new(0.0, variance.sqrt()).map_err(|_| OptError::InvalidParameter {
        index: variance_index,
        value: variance,
        reason: "Variance rejected by the normal density.",
    })?;
    Ok(-observations.iter().enumerate().map(|(i, &x)| normal.ln_pdf(x - mean(i))).sum::<f64>())
}

fn check_finite_entries(theta: &Theta) -> OptResult<()> {
    match theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidParameter {
            index,
            value,
            reason: "Initial parameters must be finite.",
        }),
        None => Ok(()),
    }
}

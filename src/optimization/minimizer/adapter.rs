//! Adapter that exposes a user `NegLogLikelihood` as an `argmin` problem.
//!
//! The solver works in unconstrained optimizer space `z`; the adapter maps
//! each `z` into the bounded model space with [`Bounds::to_model`] before
//! calling the evaluator. Analytic gradients are chain-ruled through the
//! diagonal Jacobian `dθ/dz`. Without an analytic gradient, the **composite**
//! cost `z ↦ NLL(θ(z))` is finite-differenced directly.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    minimizer::{
        bounds::Bounds,
        finite_diff::run_fd_diff,
        traits::NegLogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `NegLogLikelihood` plus its data and bounds to `argmin`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: NegLogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub bounds: &'a Bounds,
}

impl<'a, F: NegLogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over an evaluator, its data, and bounds.
    pub fn new(f: &'a F, data: &'a F::Data, bounds: &'a Bounds) -> Self {
        Self { f, data, bounds }
    }
}

impl<'a, F: NegLogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `NLL(θ(z))`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the evaluator.
    /// - Returns [`OptError::DomainViolation`] when the evaluator reports a
    ///   non-finite value (`+∞` outside the support).
    fn cost(&self, z: &Self::Param) -> Result<Self::Output, Error> {
        let theta = self.bounds.to_model(z);
        let output = self.f.value(&theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::DomainViolation { theta: theta.to_vec(), value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: NegLogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the optimizer-space gradient at `z`.
    ///
    /// Behavior:
    /// - Analytic path: `∂NLL/∂zᵢ = ∂NLL/∂θᵢ · dθᵢ/dzᵢ`, validated.
    /// - Otherwise central differences of the composite cost, retried with
    ///   forward differences if an evaluation failed or the result is
    ///   non-finite.
    ///
    /// The FD closure must return `f64`, so the first evaluation error is
    /// captured in `closure_err` and `NaN` is returned in its place.
    fn gradient(&self, z: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = z.len();
        let theta = self.bounds.to_model(z);
        match self.f.grad(&theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                let g_z = g * self.bounds.jacobian_diag(z);
                validate_grad(&g_z, dim)?;
                Ok(g_z)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |z: &Theta| -> f64 {
                    match self.cost(z) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = z.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
                    return Ok(fd_grad);
                }
                Ok(run_fd_diff(z, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::{Array1, array};

    // Quadratic NLL `Σ (θᵢ - cᵢ)²` with optional analytic gradient.
    struct Quadratic {
        analytic: bool,
    }

    impl NegLogLikelihood for Quadratic {
        type Data = Array1<f64>;

        fn dim(&self) -> usize {
            2
        }

        fn value(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<f64> {
            Ok((theta - data).mapv(|d| d * d).sum())
        }

        fn check(&self, _theta: &Theta, _data: &Array1<f64>) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<Grad> {
            if self.analytic {
                Ok(2.0 * (theta - data))
            } else {
                Err(OptError::GradientNotImplemented)
            }
        }
    }

    // Evaluator that is +∞ whenever θ₀ < 0.
    struct HalfLine;

    impl NegLogLikelihood for HalfLine {
        type Data = ();

        fn dim(&self) -> usize {
            1
        }

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
            if theta[0] < 0.0 { Ok(f64::INFINITY) } else { Ok(theta[0]) }
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Analytic vs finite-difference gradients through a bounded mapping.
    // - Surfacing of `+∞` evaluator values as `DomainViolation`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The chain-ruled analytic gradient must agree with finite differences of
    // the composite cost.
    //
    // Given
    // -----
    // - A quadratic with centre (0.5, 2.0), bounds (-1, 1) and (0, ∞).
    //
    // Expect
    // ------
    // - Both gradient paths agree to 1e-5.
    fn analytic_and_fd_gradients_agree_in_optimizer_space() {
        let data = array![0.5, 2.0];
        let bounds = Bounds::new(vec![Some(-1.0), Some(0.0)], vec![Some(1.0), None]).unwrap();
        let z = bounds.to_unconstrained(&array![0.1, 0.7]).unwrap();
        let analytic = Quadratic { analytic: true };
        let numeric = Quadratic { analytic: false };

        let g_a = ArgMinAdapter::new(&analytic, &data, &bounds).gradient(&z).unwrap();
        let g_n = ArgMinAdapter::new(&numeric, &data, &bounds).gradient(&z).unwrap();

        for (a, n) in g_a.iter().zip(g_n.iter()) {
            assert!((a - n).abs() < 1e-5, "{a} vs {n}");
        }
    }

    #[test]
    // Purpose
    // -------
    // An evaluator returning `+∞` must not be silently accepted.
    //
    // Given
    // -----
    // - `HalfLine` with deliberately unbounded parameter, evaluated at θ = -1.
    //
    // Expect
    // ------
    // - `cost` fails and converts back into `OptError::DomainViolation`.
    fn infinite_cost_is_domain_violation() {
        let bounds = Bounds::unbounded(1);
        let adapter = ArgMinAdapter::new(&HalfLine, &(), &bounds);

        let err = adapter.cost(&array![-1.0]).expect_err("negative θ is outside support");

        assert!(matches!(OptError::from(err), OptError::DomainViolation { .. }));
        assert_eq!(adapter.cost(&array![2.0]).unwrap(), 2.0);
    }
}

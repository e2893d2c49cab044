//! minimizer::finite_diff — finite-difference gradients and Hessians.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate with error capture and validation so the
//! adapter (gradients) and the inference layer (observed information) can
//! request derivatives without touching the `finitediff` API directly.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient; an error captured by the
//!   objective closure wins over the numeric result.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map,
//!   falling back to forward differences when validation fails, then
//!   symmetrized in place.
//!
//! Conventions
//! -----------
//! - Derivatives are taken with respect to whatever vector the caller
//!   passes (optimizer-space `z` in the adapter, model-space `θ` in
//!   inference).
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// `func` is expected to write the first evaluation error into
/// `closure_err` and return `NaN`. The cell is cleared on entry.
///
/// # Errors
/// - The captured backend error, converted into `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient map `f` at `theta`.
///
/// Central differences first; on a validation failure the forward-difference
/// Hessian is tried and only its validation error is surfaced.
///
/// # Errors
/// - `HessianDimMismatch` / `InvalidHessian` from [`validate_hessian`].
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients of a unit-variance normal NLL, and error
    //   capture from the objective.
    // - Hessians of the joint normal score, symmetrization, and NaN handling.
    //
    // They intentionally DO NOT cover:
    // - End-to-end optimizer behavior (see the minimizer API tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // FD gradient of `½Σ(xᵢ − μ)²` matches the analytic `nμ − Σxᵢ`.
    fn forward_gradient_matches_normal_mean_score() {
        let x = array![0.4, -1.2, 2.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let nll = |mu: &Theta| x.iter().map(|xi| 0.5 * (xi - mu[0]).powi(2)).sum::<f64>();

        let grad = run_fd_diff(&array![0.3], &nll, &closure_err).unwrap();

        assert!((grad[0] - (3.0 * 0.3 - 1.2)).abs() < 1e-5, "{grad}");
    }

    #[test]
    // Purpose
    // -------
    // A backend error recorded by the objective wins over the numbers it
    // returned.
    fn captured_objective_error_is_returned() {
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let failing = |_: &Theta| {
            let err = ArgminError::NotImplemented { text: "nll".to_string() };
            closure_err.replace(Some(err.into()));
            f64::NAN
        };

        let err = run_fd_diff(&array![1.0, 2.0], &failing, &closure_err).unwrap_err();

        assert!(matches!(err, OptError::NotImplemented { .. }));
        assert!(closure_err.borrow().is_none());
    }

    #[test]
    // Purpose
    // -------
    // The Hessian of the joint normal NLL at the MLE is the closed-form
    // observed information.
    //
    // Given
    // -----
    // - Gradient map of `NLL(μ, σ²)` for x = [1, 2, 3, 6]; MLE (3, 3.5).
    //
    // Expect
    // ------
    // - H ≈ diag(n/σ², n/(2σ⁴)) and exactly symmetric.
    fn hessian_of_normal_score_is_observed_information() {
        let x = array![1.0, 2.0, 3.0, 6.0];
        let n = x.len() as f64;
        let score = |t: &Theta| {
            let (mu, s2) = (t[0], t[1]);
            let r: f64 = x.iter().map(|xi| xi - mu).sum();
            let q: f64 = x.iter().map(|xi| (xi - mu).powi(2)).sum();
            array![-r / s2, n / (2.0 * s2) - q / (2.0 * s2 * s2)]
        };

        let hess = compute_hessian(&score, &array![3.0, 3.5]).unwrap();

        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
        assert!((hess[[0, 0]] - n / 3.5).abs() < 1e-5);
        assert!((hess[[1, 1]] - n / (2.0 * 3.5 * 3.5)).abs() < 1e-5);
        assert!(hess[[0, 1]].abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // A score that is NaN everywhere fails on both difference schemes.
    fn non_finite_score_is_invalid_hessian() {
        let err = compute_hessian(&|_: &Theta| array![f64::NAN], &array![0.0]).unwrap_err();

        assert!(matches!(err, OptError::InvalidHessian { row: 0, col: 0, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Off-diagonal pairs are averaged; the diagonal is untouched.
    fn symmetrize_averages_off_diagonal() {
        let mut h: Hessian = Array2::from_shape_vec((2, 2), vec![5.0, 2.0, 4.0, 7.0]).unwrap();

        symmetrize_hess(&mut h);

        assert_eq!(h, array![[5.0, 3.0], [3.0, 7.0]]);
    }
}

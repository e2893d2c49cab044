//! Input and output checks shared by the minimizer, the likelihoods, and
//! the standard-error code.
//!
//! Every check reports the *first* offending entry so error messages point
//! at a concrete index.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::types::{Grad, Hessian, Theta},
};
use ndarray::Array1;

/// Index and value of the first `NaN`/`±∞` in `values`, if any.
fn first_non_finite<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(usize, f64)> {
    values.into_iter().copied().enumerate().find(|(_, v)| !v.is_finite())
}

/// Reason a present tolerance is unusable, or `None` if it is fine.
fn tolerance_problem(tol: f64) -> Option<&'static str> {
    if !tol.is_finite() {
        Some("Tolerance must be finite.")
    } else if tol <= 0.0 {
        Some("Tolerance must be positive.")
    } else {
        None
    }
}

/// # Errors
/// [`OptError::InvalidTolGrad`] for a non-finite or non-positive value.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// # Errors
/// [`OptError::InvalidTolCost`] for a non-finite or non-positive value.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

/// Gradient returned by an evaluator: right length, all entries finite.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] on a length mismatch.
/// - [`OptError::InvalidGradient`] for the first non-finite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match first_non_finite(grad) {
        Some((index, value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter vector.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if the solver never recorded one.
/// - [`OptError::InvalidThetaHat`] for the first non-finite entry.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, value)) = first_non_finite(&theta) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

/// # Errors
/// [`OptError::NonFiniteCost`] if the minimum NLL is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_finite() { Ok(()) } else { Err(OptError::NonFiniteCost { value }) }
}

/// Observed-information matrix: `dim × dim`, all entries finite.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] for the wrong shape.
/// - [`OptError::InvalidHessian`] for the first non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.dim() != (dim, dim) {
        return Err(OptError::HessianDimMismatch { expected: dim, found: hessian.dim() });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}

/// # Errors
/// [`OptError::InvalidArgument`] unless `theta.len() == dim`.
pub fn validate_theta_len(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::InvalidArgument {
            reason: format!("parameter vector has length {}, expected {dim}", theta.len()),
        });
    }
    Ok(())
}

/// Sample passed to a likelihood: non-empty, all entries finite.
///
/// # Errors
/// - [`OptError::InvalidArgument`] if `data` is empty.
/// - [`OptError::InvalidData`] for the first non-finite entry.
pub fn validate_observations(data: &Array1<f64>) -> OptResult<()> {
    if data.is_empty() {
        return Err(OptError::InvalidArgument {
            reason: "observation vector must be non-empty".to_string(),
        });
    }
    match first_non_finite(data) {
        Some((index, value)) => Err(OptError::InvalidData { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    // Purpose
    // -------
    // Tolerances must be finite and strictly positive when present.
    //
    // Expect
    // ------
    // - `None` passes; 0, negative, and NaN are rejected with the right variant.
    fn tolerance_checks_reject_non_positive_and_non_finite() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_cost(Some(f64::NAN)), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Gradient, theta_hat, and Hessian validation report the offending entry.
    //
    // Expect
    // ------
    // - Wrong length and NaN entries produce the documented variants.
    fn vector_and_matrix_validation_reports_offending_entry() {
        assert!(matches!(
            validate_grad(&array![1.0, 2.0], 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(
            validate_grad(&array![1.0, f64::NAN], 2),
            Err(OptError::InvalidGradient { index: 1, .. })
        ));
        assert!(matches!(validate_theta_hat(None), Err(OptError::MissingThetaHat)));
        let h = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, f64::INFINITY, 1.0]).unwrap();
        assert!(matches!(
            validate_hessian(&h, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Observation vectors must be non-empty and finite.
    //
    // Expect
    // ------
    // - Empty vectors are an `InvalidArgument`; a NaN is `InvalidData` at its index.
    fn observations_must_be_non_empty_and_finite() {
        let empty: Array1<f64> = Array1::zeros(0);
        assert!(matches!(validate_observations(&empty), Err(OptError::InvalidArgument { .. })));
        assert!(matches!(
            validate_observations(&array![0.1, f64::NAN]),
            Err(OptError::InvalidData { index: 1, .. })
        ));
        assert!(validate_observations(&array![0.1, -2.0]).is_ok());
    }
}

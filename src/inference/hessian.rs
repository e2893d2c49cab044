//! inference::hessian — observed information and standard errors at the MLE.
//!
//! Purpose
//! -------
//! Turn a fitted negative log-likelihood into per-parameter standard errors.
//! The observed information `J(θ̂)` is the Hessian of the **total** NLL at
//! the estimate; standard errors are the square roots of the diagonal of
//! its Moore–Penrose pseudoinverse.
//!
//! Key behaviors
//! -------------
//! - With an analytic gradient, `J(θ̂)` is the finite-difference Jacobian of
//!   that gradient ([`compute_hessian`]).
//! - Without one, `J(θ̂)` comes from central second differences of the
//!   NLL values with a step of `1e-4·max(1, |θᵢ|)`.
//! - The pseudoinverse uses a symmetric eigendecomposition (`nalgebra`);
//!   eigenvalues at or below [`EIGEN_EPS`] are dropped, inflating SEs along
//!   weakly identified directions instead of dividing by noise.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ̂` must be an interior point at which the NLL is finite and smooth.
//! - The information matrix is symmetrized before decomposition.
//!
//! Conventions
//! -----------
//! - SEs are on the model-space scale of `θ̂`, e.g. the variance entry of a
//!   Gaussian model gets an SE for `σ²`, not for `σ`.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Grad, Hessian, NegLogLikelihood, Theta, finite_diff::compute_hessian,
        validation::{validate_hessian, validate_theta_len},
    },
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::Array1;
use std::cell::RefCell;

/// Relative step for the value-only second-difference Hessian.
const VALUE_HESS_STEP: f64 = 1e-4;

/// mle_standard_errors — asymptotic standard errors at an MLE.
///
/// Purpose
/// -------
/// Compute `SEᵢ = sqrt([J(θ̂)⁻¹]ᵢᵢ)` from the observed information
/// `J(θ̂) = ∇²NLL(θ̂)` of `f` at the supplied estimate.
///
/// Parameters
/// ----------
/// - `f`: `&F`  
///   Evaluator the estimate was fitted with. An analytic `grad` is
///   differentiated once more; otherwise central second differences of
///   `value` are used.
/// - `data`: `&F::Data`  
///   The dataset used for the fit.
/// - `theta_hat`: `&Theta`  
///   Estimate in model space, normally `OptimOutcome::theta_hat`.
///
/// Returns
/// -------
/// `OptResult<Array1<f64>>`  
///   - `Ok(se)` of length `f.dim()`, one entry per parameter.
///
/// Errors
/// ------
/// - [`OptError::InvalidArgument`]  
///   `theta_hat` does not match `f.dim()`.
/// - Any evaluator error raised while differentiating.
/// - [`OptError::InvalidHessian`]  
///   The information matrix contains a non-finite entry.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - The inverse is an eigen pseudo-inverse: eigenvalues at or below
///   `EIGEN_EPS` are dropped, so a flat direction yields a zero entry
///   instead of an error.
/// - `theta_hat` is not checked against any bounds; evaluate at an
///   interior point.
///
/// Examples
/// --------
/// ```
/// use ndarray::array;
/// use rust_simstats::inference::mle_standard_errors;
/// use rust_simstats::likelihood::NormalMeanNll;
///
/// let x = array![0.2, -0.1, 0.4, 0.3];
/// let nll = NormalMeanNll::new(1.0).unwrap();
/// let se = mle_standard_errors(&nll, &x, &array![0.2]).unwrap();
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// ```
pub fn mle_standard_errors<F: NegLogLikelihood>(
    f: &F, data: &F::Data, theta_hat: &Theta,
) -> OptResult<Array1<f64>> {
    let obs_info = observed_information(f, data, theta_hat)?;
    Ok(solve_for_se(to_dmatrix(&obs_info)))
}

/// Observed information matrix `J(θ̂) = ∇²NLL(θ̂)`.
///
/// # Errors
/// As for [`mle_standard_errors`].
pub fn observed_information<F: NegLogLikelihood>(
    f: &F, data: &F::Data, theta_hat: &Theta,
) -> OptResult<Hessian> {
    validate_theta_len(theta_hat, f.dim())?;
    match f.grad(theta_hat, data) {
        Ok(_) => gradient_hessian(f, data, theta_hat),
        Err(OptError::GradientNotImplemented) => value_hessian(f, data, theta_hat),
        Err(e) => Err(e),
    }
}

// ---- Helper methods ----

/// Finite-difference Jacobian of the analytic gradient, with the first
/// evaluator error surfaced in place of the NaN-poisoned matrix.
fn gradient_hessian<F: NegLogLikelihood>(
    f: &F, data: &F::Data, theta_hat: &Theta,
) -> OptResult<Hessian> {
    let dim = theta_hat.len();
    let first_err: RefCell<Option<OptError>> = RefCell::new(None);
    let grad_map = |theta: &Theta| -> Grad {
        match f.grad(theta, data) {
            Ok(g) => g,
            Err(e) => {
                first_err.borrow_mut().get_or_insert(e);
                Array1::from_elem(dim, f64::NAN)
            }
        }
    };
    let hess = compute_hessian(&grad_map, theta_hat);
    if let Some(e) = first_err.take() {
        return Err(e);
    }
    hess
}

/// Central second differences of the NLL values.
fn value_hessian<F: NegLogLikelihood>(
    f: &F, data: &F::Data, theta_hat: &Theta,
) -> OptResult<Hessian> {
    let dim = theta_hat.len();
    let steps: Vec<f64> =
        theta_hat.iter().map(|t| VALUE_HESS_STEP * t.abs().max(1.0)).collect();
    let eval = |shifts: &[(usize, f64)]| -> OptResult<f64> {
        let mut theta = theta_hat.clone();
        for &(k, s) in shifts {
            theta[k] += s;
        }
        f.value(&theta, data)
    };
    let centre = eval(&[])?;
    let mut hess = Hessian::zeros((dim, dim));
    for i in 0..dim {
        let hi = steps[i];
        hess[[i, i]] = (eval(&[(i, hi)])? - 2.0 * centre + eval(&[(i, -hi)])?) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let mixed = eval(&[(i, hi), (j, hj)])? - eval(&[(i, hi), (j, -hj)])?
                - eval(&[(i, -hi), (j, hj)])?
                + eval(&[(i, -hi), (j, -hj)])?;
            hess[[i, j]] = mixed / (4.0 * hi * hj);
            hess[[j, i]] = hess[[i, j]];
        }
    }
    validate_hessian(&hess, dim)?;
    Ok(hess)
}

fn to_dmatrix(obs_info: &Hessian) -> DMatrix<f64> {
    DMatrix::from_fn(obs_info.nrows(), obs_info.ncols(), |i, j| obs_info[[i, j]])
}

/// `SE(θ̂ᵢ) = sqrt(Σ_{k: λₖ > EIGEN_EPS} Q[i,k]² / λₖ)` for `J = QΛQᵀ`.
fn solve_for_se(obs_info: DMatrix<f64>) -> Array1<f64> {
    let n = obs_info.nrows();
    let eigen = obs_info.symmetric_eigen();
    let q = eigen.eigenvectors;
    Array1::from_iter((0..n).map(|i| {
        eigen
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum::<f64>()
            .sqrt()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::{NormalMeanNll, NormalNll};
    use crate::optimization::errors::OptResult;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // NormalNll without its analytic gradient.
    struct ValueOnlyNormal;

    impl NegLogLikelihood for ValueOnlyNormal {
        type Data = Array1<f64>;

        fn dim(&self) -> usize {
            2
        }

        fn value(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<f64> {
            NormalNll.value(theta, data)
        }

        fn check(&self, theta: &Theta, data: &Array1<f64>) -> OptResult<()> {
            NormalNll.check(theta, data)
        }
    }

    fn sample() -> Array1<f64> {
        array![-0.5, 1.0, 0.2, -0.3, 0.5, 0.89, -0.11, -0.71, 1.0, -1.3, 0.84]
    }

    fn mean_and_pop_var(x: &Array1<f64>) -> (f64, f64) {
        let n = x.len() as f64;
        let m = x.sum() / n;
        (m, x.mapv(|v| (v - m) * (v - m)).sum() / n)
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Standard errors against the closed-form Gaussian information.
    // - Agreement of the analytic-gradient and value-only paths.
    // - Eigenvalue truncation for a singular information matrix.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Known-variance normal: `J = n/σ²`, so `SE(μ̂) = σ/√n`.
    fn known_variance_mean_se_is_sigma_over_root_n() {
        // Arrange
        let x = sample();
        let nll = NormalMeanNll::new(2.0).unwrap();
        let (m, _) = mean_and_pop_var(&x);

        // Act
        let se = mle_standard_errors(&nll, &x, &array![m]).unwrap();

        // Assert
        assert_relative_eq!(se[0], (2.0 / x.len() as f64).sqrt(), max_relative = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Joint normal at the MLE: `J = diag(n/v̂, n/(2v̂²))`.
    //
    // Expect
    // ------
    // - SE(μ̂) = sqrt(v̂/n), SE(v̂) = v̂·sqrt(2/n) on both derivative paths.
    fn joint_normal_se_matches_closed_form_on_both_paths() {
        let x = sample();
        let n = x.len() as f64;
        let (m, v) = mean_and_pop_var(&x);
        let theta_hat = array![m, v];

        let analytic = mle_standard_errors(&NormalNll, &x, &theta_hat).unwrap();
        let numeric = mle_standard_errors(&ValueOnlyNormal, &x, &theta_hat).unwrap();

        assert_relative_eq!(analytic[0], (v / n).sqrt(), max_relative = 1e-5);
        assert_relative_eq!(analytic[1], v * (2.0 / n).sqrt(), max_relative = 1e-5);
        assert_relative_eq!(numeric[0], analytic[0], max_relative = 1e-3);
        assert_relative_eq!(numeric[1], analytic[1], max_relative = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // A zero eigenvalue is dropped rather than inverted.
    //
    // Given
    // -----
    // - J = [[1, 1], [1, 1]] (eigenvalues 2 and 0).
    //
    // Expect
    // ------
    // - Finite SEs equal to sqrt(1/4) = 0.5 from the surviving direction.
    fn singular_information_is_pseudo_inverted() {
        let j = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);

        let se = solve_for_se(j);

        assert!(se.iter().all(|s| s.is_finite()));
        assert_relative_eq!(se[0], 0.5, max_relative = 1e-10);
        assert_relative_eq!(se[1], 0.5, max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Dimension mismatches are reported before any differentiation.
    fn wrong_length_theta_is_rejected() {
        let x = sample();
        assert!(matches!(
            mle_standard_errors(&NormalNll, &x, &array![0.0]),
            Err(OptError::InvalidArgument { .. })
        ));
    }
}

//! High-level entry point for bounded negative log-likelihood minimization.
//!
//! Validates the starting point, maps it into optimizer space, selects an
//! L-BFGS solver with the configured line search, and delegates the run to
//! [`run_lbfgs`].
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        bounds::Bounds,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, MLEOptions, NegLogLikelihood},
        validation::validate_theta_len,
    },
};

/// minimize — bounded L-BFGS minimization of a negative log-likelihood.
///
/// Purpose
/// -------
/// Find `θ̂ = argmin f(θ; data)` over the open box described by `bounds`.
/// Any failure surfaces as an [`OptError`] rather than a silent estimate.
///
/// Parameters
/// ----------
/// - `f`: `&F`  
///   Evaluator implementing [`NegLogLikelihood`]; `f.dim()` fixes the
///   parameter count.
/// - `theta0`: `Theta`  
///   Starting point. Must have length `f.dim()` and lie strictly inside
///   `bounds`.
/// - `data`: `&F::Data`  
///   Dataset passed unchanged to every `value`/`grad`/`check` call.
/// - `bounds`: `&Bounds`  
///   Per-parameter box; use [`Bounds::unbounded`] for an unconstrained fit.
/// - `opts`: `&MLEOptions`  
///   Tolerances, iteration cap, line search, and L-BFGS memory.
///
/// Returns
/// -------
/// `OptResult<OptimOutcome>`  
///   - `Ok(outcome)` only when argmin reports `SolverConverged` or
///     `TargetCostReached`; `outcome.theta_hat` is in model space.
///
/// Errors
/// ------
/// - [`OptError::InvalidArgument`]  
///   `theta0` or `bounds` does not match `f.dim()`.
/// - [`OptError::InitialPointOutOfBounds`]  
///   `theta0` is non-finite, outside the box, or exactly on a bound.
/// - Anything `f.check(theta0, data)` returns.
/// - [`OptError::DomainViolation`]  
///   The evaluator reported `+∞` during the run.
/// - [`OptError::NonConvergence`]  
///   The iteration cap was hit or the solver stopped for another reason.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - The box is open. Bounds are enforced by the reparameterization of
///   [`Bounds::to_unconstrained`], which has no finite preimage for a point
///   on a bound, so a start at `lᵢ` or `uᵢ` is rejected rather than nudged
///   inward. Estimates can approach an active bound arbitrarily closely but
///   never equal it.
/// - Every evaluator call receives a point inside the box.
///
/// Examples
/// --------
/// ```
/// use ndarray::array;
/// use rust_simstats::likelihood::NormalMeanNll;
/// use rust_simstats::optimization::minimizer::{Bounds, MLEOptions, minimize};
///
/// let data = array![-0.5, 1.0, 0.2, -0.3, 0.5];
/// let nll = NormalMeanNll::new(1.0).unwrap();
/// let out = minimize(&nll, array![0.0], &data, &Bounds::unbounded(1), &MLEOptions::default())
///     .unwrap();
/// assert!((out.theta_hat[0] - data.mean().unwrap()).abs() < 1e-4);
/// ```
pub fn minimize<F: NegLogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, bounds: &Bounds, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    validate_theta_len(&theta0, f.dim())?;
    if bounds.dim() != f.dim() {
        return Err(OptError::InvalidArgument {
            reason: format!("bounds cover {} parameters, expected {}", bounds.dim(), f.dim()),
        });
    }
    let z0 = bounds.to_unconstrained(&theta0)?;
    f.check(&theta0, data)?;

    let problem = ArgMinAdapter::new(f, data, bounds);
    let outcome = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(z0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(z0, opts, problem, solver)
        }
    };
    match &outcome {
        Ok(out) => tracing::debug!(
            theta_hat = ?out.theta_hat.to_vec(),
            value = out.value,
            iterations = out.iterations,
            "minimization converged"
        ),
        Err(OptError::NonConvergence { status, iterations }) => {
            tracing::warn!(%status, iterations, "minimization did not converge")
        }
        Err(_) => {}
    }
    outcome
}

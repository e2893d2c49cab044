//! minimizer::builders — L-BFGS solver construction.
//!
//! Purpose
//! -------
//! Build L-BFGS solvers for the bounded minimizer without exposing argmin's
//! generic wiring to [`crate::optimization::minimizer::minimize`].
//!
//! Key behaviors
//! -------------
//! - One builder per supported line search, both funnelled through
//!   [`configure_lbfgs`] so tolerance handling lives in one place.
//! - The history size comes from `opts.lbfgs_mem`, falling back to
//!   [`DEFAULT_LBFGS_MEM`].
//!
//! Conventions
//! -----------
//! - Builders never set the initial point or `max_iters`; both are runtime
//!   concerns applied by [`crate::optimization::minimizer::run::run_lbfgs`].
//! - A tolerance left as `None` keeps argmin's default for that criterion.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with the Hager–Zhang line search.
///
/// # Errors
/// Tolerances argmin refuses, converted into `OptError`.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LBFGS::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with the More–Thuente line search.
///
/// # Errors
/// Tolerances argmin refuses, converted into `OptError`.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply the gradient-norm and cost-change tolerances from `opts`.
///
/// Generic over the line search so new L-BFGS variants can reuse it.
///
/// # Errors
/// Propagates `with_tolerance_grad` / `with_tolerance_cost` failures.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::minimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of both line-search variants with default and explicit
    //   history sizes.
    // - Tolerance wiring in `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - Solver execution, which the `api` tests exercise end to end.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both builders succeed with and without an explicit L-BFGS memory.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - Every combination yields `Ok(_)`.
    fn builders_accept_default_and_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), Some(1e-10), Some(50)).expect("valid tolerances");
        let default_mem = MLEOptions::new(tols, LineSearcher::HagerZhang, None).unwrap();
        let explicit_mem = MLEOptions::new(tols, LineSearcher::MoreThuente, Some(11)).unwrap();

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&default_mem).is_ok());
        assert!(build_optimizer_hager_zhang(&explicit_mem).is_ok());
        assert!(build_optimizer_more_thuente(&default_mem).is_ok());
        assert!(build_optimizer_more_thuente(&explicit_mem).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Absent tolerances leave argmin defaults in place without error.
    //
    // Given
    // -----
    // - Only `max_iter` is set.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("valid tolerances");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, None).unwrap();

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok());
    }
}

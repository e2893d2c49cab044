//! Public API surface for negative log-likelihood minimization.
//!
//! - [`NegLogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by `minimize`.
//!
//! Convention: evaluators return `-Σ log f(xᵢ; θ)` directly and the solver
//! minimizes it. Analytic gradients, when provided, are gradients of that
//! same negative log-likelihood with respect to the model-space `θ`.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented negative log-likelihood.
///
/// The dataset is always passed explicitly; implementations hold only model
/// constants (e.g. a fixed variance), never observations.
///
/// Required:
/// - `dim()`: number of free parameters.
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `-ℓ(θ)`. Points
///   outside the density's support return `Ok(f64::INFINITY)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject structurally invalid
///   `θ`/data pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic `∇(-ℓ)(θ)`. If not
///   implemented, finite differences are used automatically.
pub trait NegLogLikelihood {
    type Data;

    // Required methods
    fn dim(&self) -> usize;
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search run inside each L-BFGS iteration.
///
/// Parses from `"MoreThuente"` / `"HagerZhang"`, ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearcher {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [("MoreThuente", Self::MoreThuente), ("HagerZhang", Self::HagerZhang)]
            .into_iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(name))
            .map(|(_, ls)| ls)
            .ok_or_else(|| OptError::InvalidLineSearch {
                name: name.to_string(),
                reason: "expected 'MoreThuente' or 'HagerZhang' (any case)",
            })
    }
}

/// Settings for one `minimize` call.
///
/// The default stops when `‖∇‖ < 1e-8` in optimizer space or after 500
/// iterations, uses More–Thuente, stays quiet, and keeps
/// [`DEFAULT_LBFGS_MEM`](crate::optimization::minimizer::DEFAULT_LBFGS_MEM)
/// correction pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    /// Log the starting NLL and, with `obs_slog`, every iteration.
    pub verbose: bool,
    /// L-BFGS history length; `None` selects the default.
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] for `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "an L-BFGS history needs at least one correction pair",
            });
        }
        Ok(Self { tols, line_searcher, verbose: false, lbfgs_mem })
    }

    pub fn with_verbose(self, verbose: bool) -> Self {
        Self { verbose, ..self }
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-8), tol_cost: None, max_iter: Some(500) },
            line_searcher: LineSearcher::default(),
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. Any subset may be set, but not none of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Gradient-norm threshold in optimizer space.
    pub tol_grad: Option<f64>,
    /// Threshold on the change in NLL between iterations.
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when every rule is `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for a
    ///   non-finite or non-positive threshold.
    /// - [`OptError::InvalidMaxIter`] for `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        let tols = Self { tol_grad, tol_cost, max_iter };
        if tols == (Self { tol_grad: None, tol_cost: None, max_iter: None }) {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "at least one iteration must be allowed",
            });
        }
        Ok(tols)
    }
}

/// Result of a successful `minimize` call.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    /// Minimizer in model space, inside the declared bounds.
    pub theta_hat: Theta,
    /// NLL at `theta_hat`.
    pub value: f64,
    /// Debug form of argmin's termination reason.
    pub status: String,
    pub iterations: usize,
    /// argmin counters such as `cost_count` and `gradient_count`.
    pub fn_evals: FnEvalMap,
    /// L2 norm of the final optimizer-space gradient, when argmin kept one.
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Assemble an outcome from the final solver state.
    ///
    /// `SolverConverged` and `TargetCostReached` are accepted; every other
    /// termination becomes [`OptError::NonConvergence`] so a point the solver
    /// merely stopped at is never reported as an estimate.
    ///
    /// # Errors
    /// - [`OptError::NonConvergence`] as above.
    /// - [`OptError::MissingThetaHat`], [`OptError::InvalidThetaHat`], or
    ///   [`OptError::NonFiniteCost`] for an unusable final state.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let iterations = usize::try_from(iterations).unwrap_or(usize::MAX);
        let TerminationStatus::Terminated(
            reason @ (TerminationReason::SolverConverged | TerminationReason::TargetCostReached),
        ) = &termination
        else {
            return Err(OptError::NonConvergence { status: format!("{termination:?}"), iterations });
        };
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        Ok(Self {
            theta_hat,
            value,
            status: format!("{reason:?}"),
            iterations,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation rules of `Tolerances::new` and `MLEOptions::new`.
    // - Case-insensitive parsing of `LineSearcher`.
    // - Mapping of termination statuses in `OptimOutcome::new`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // At least one stopping rule is required and each must be well-formed.
    //
    // Expect
    // ------
    // - All-`None` is rejected; zero `max_iter` is rejected; valid input passes.
    fn tolerances_new_enforces_rules() {
        assert!(matches!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided)));
        assert!(matches!(
            Tolerances::new(Some(1e-6), None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
        assert!(Tolerances::new(None, None, Some(10)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS memory of zero is invalid; line searcher names parse in any case.
    fn options_and_line_searcher_parsing() {
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).unwrap();
        assert!(matches!(
            MLEOptions::new(tols, LineSearcher::HagerZhang, Some(0)),
            Err(OptError::InvalidLBFGSMem { .. })
        ));
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert_eq!("moreThuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert!(matches!(
            "bfgs".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
        assert!(!MLEOptions::default().verbose);
        assert!(MLEOptions::default().with_verbose(true).verbose);
    }

    #[test]
    // Purpose
    // -------
    // Running out of iterations is a non-convergence, not a result.
    //
    // Given
    // -----
    // - A `MaxItersReached` termination with an otherwise valid state.
    //
    // Expect
    // ------
    // - `OptError::NonConvergence` carrying the iteration count.
    fn max_iters_reached_is_non_convergence() {
        let out = OptimOutcome::new(
            Some(array![1.0]),
            2.0,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            7,
            FnEvalMap::new(),
            None,
        );
        assert!(matches!(out, Err(OptError::NonConvergence { iterations: 7, .. })));
    }

    #[test]
    // Purpose
    // -------
    // A converged state produces a populated outcome.
    //
    // Expect
    // ------
    // - `status` mentions `SolverConverged`; `grad_norm` is the L2 norm.
    fn converged_state_builds_outcome() {
        let out = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            3.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            4,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
        )
        .unwrap();
        assert!(out.status.contains("SolverConverged"));
        assert_eq!(out.grad_norm, Some(5.0));
        assert_eq!(out.iterations, 4);
    }
}

//! Executes an `argmin` solver on a bounded negative log-likelihood problem
//! and returns a validated [`OptimOutcome`] in model space.
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        Grad, MLEOptions, NegLogLikelihood, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
use argmin::core::{CostFunction, Executor, Gradient, State};
use argmin_math::ArgminL2Norm;

/// Run an L-BFGS solve starting from the optimizer-space point `z0`.
///
/// Wires the adapter, the configured solver, the starting point, the
/// optional `max_iters`, and (with the `obs_slog` feature and
/// `opts.verbose`) a terminal slog observer. After the run, the best
/// optimizer-space point is mapped back through the adapter's bounds so
/// `theta_hat` is always a model-space vector, and `value` is the best
/// negative log-likelihood seen.
///
/// # Errors
/// - Any argmin runtime error, including evaluator errors raised inside the
///   cost or gradient, converted through `From<argmin::core::Error>`.
/// - `NonConvergence` and validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    z0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: NegLogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    if opts.verbose {
        log_initial_state(&z0, &problem)?;
    }
    let bounds = problem.bounds;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(z0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let theta_hat = result.take_best_param().map(|z| bounds.to_model(&z));
    OptimOutcome::new(
        theta_hat,
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

fn log_initial_state<F>(z0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: NegLogLikelihood,
{
    let nll0 = problem.cost(z0)?;
    let grad_norm = problem.gradient(z0).ok().map(|g| g.l2_norm());
    tracing::info!(
        theta0 = ?problem.bounds.to_model(z0).to_vec(),
        nll0,
        grad_norm,
        "starting L-BFGS"
    );
    Ok(())
}

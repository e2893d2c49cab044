//! simulation::regression — simulate-and-fit studies.
//!
//! Each study builds its configuration locally per grid point, simulates a
//! fresh dataset from the replicate's own generator, fits it, and records one
//! scalar per replicate:
//!
//! - [`slope_study_over_sigma2`] / [`slope_study_over_n`]: the OLS slope of
//!   `y = β₀ + β₁ x + ε` as the noise variance or the sample size varies.
//! - [`variance_mle_study`]: the numerical MLE of `σ²` for a normal sample,
//!   which exposes the `(n − 1)/n` bias of the divide-by-`n` estimator.
//! - [`interval_error_study`]: absolute error of a Monte Carlo interval
//!   probability against the normal CDF, as the number of draws grows.
use crate::likelihood::{
    normal::NormalNll,
    regression::{OlsFit, RegressionData, fit_ols},
};
use crate::monte_carlo::{
    estimator::{estimate_interval_probability, normal_interval_probability},
    rng::SimRng,
    variates::VariateSource,
};
use crate::optimization::minimizer::{Bounds, MLEOptions, minimize};
use crate::simulation::{
    errors::{SimulationError, SimulationResult},
    harness::{StudyConfig, StudyTable, run_study},
};
use ndarray::{Array1, array};
use serde::Serialize;

/// Data-generating process for `y = intercept + slope·x + ε`, `ε ~ N(0, sigma2)`,
/// with `n` design points evenly spaced on `[x_lo, x_hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearSimConfig {
    pub intercept: f64,
    pub slope: f64,
    pub sigma2: f64,
    pub n: usize,
    pub x_lo: f64,
    pub x_hi: f64,
}

impl LinearSimConfig {
    /// # Errors
    /// - [`SimulationError::InvalidArgument`] if `n < 2` or the design range
    ///   is empty or non-finite.
    /// - [`SimulationError::MonteCarlo`] for a non-finite coefficient or a
    ///   non-positive `sigma2`.
    pub fn new(
        intercept: f64, slope: f64, sigma2: f64, n: usize, x_lo: f64, x_hi: f64,
    ) -> SimulationResult<Self> {
        let cfg = Self { intercept, slope, sigma2, n, x_lo, x_hi };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_sigma2(self, sigma2: f64) -> SimulationResult<Self> {
        Self::new(self.intercept, self.slope, sigma2, self.n, self.x_lo, self.x_hi)
    }

    pub fn with_n(self, n: usize) -> SimulationResult<Self> {
        Self::new(self.intercept, self.slope, self.sigma2, n, self.x_lo, self.x_hi)
    }

    /// Evenly spaced design points, endpoints included.
    pub fn design(&self) -> Array1<f64> {
        Array1::linspace(self.x_lo, self.x_hi, self.n)
    }

    fn noise(&self) -> SimulationResult<VariateSource> {
        Ok(VariateSource::normal(0.0, self.sigma2.sqrt())?)
    }

    fn validate(&self) -> SimulationResult<()> {
        if self.n < 2 {
            return Err(SimulationError::InvalidArgument {
                arg: "n",
                reason: format!("a regression needs at least two points, got {}", self.n),
            });
        }
        if !(self.x_lo.is_finite() && self.x_hi.is_finite() && self.x_lo < self.x_hi) {
            return Err(SimulationError::InvalidArgument {
                arg: "x_lo, x_hi",
                reason: format!("expected finite x_lo < x_hi, got [{}, {}]", self.x_lo, self.x_hi),
            });
        }
        if !(self.intercept.is_finite() && self.slope.is_finite()) {
            return Err(SimulationError::InvalidArgument {
                arg: "intercept, slope",
                reason: "coefficients must be finite".to_string(),
            });
        }
        self.noise().map(|_| ())
    }
}

impl Default for LinearSimConfig {
    fn default() -> Self {
        Self { intercept: 1.0, slope: 2.0, sigma2: 1.0, n: 50, x_lo: 0.0, x_hi: 1.0 }
    }
}

/// Draw one dataset from `cfg`.
///
/// # Errors
/// Configuration errors from [`LinearSimConfig::new`]; nothing is drawn
/// from `rng` in that case.
pub fn simulate_linear(
    cfg: &LinearSimConfig, rng: &mut SimRng,
) -> SimulationResult<RegressionData> {
    cfg.validate()?;
    let noise = cfg.noise()?;
    let x = cfg.design();
    let y = x.mapv(|xi| cfg.intercept + cfg.slope * xi) + noise.sample(cfg.n, rng)?;
    Ok(RegressionData::new(x, y)?)
}

/// Simulate one dataset and fit it by least squares.
pub fn simulate_and_fit(cfg: &LinearSimConfig, rng: &mut SimRng) -> SimulationResult<OlsFit> {
    let data = simulate_linear(cfg, rng)?;
    Ok(fit_ols(&data)?)
}

/// OLS slope across replicates for each noise variance in `sigma2s`.
///
/// # Errors
/// Invalid variances are reported before any replicate runs.
pub fn slope_study_over_sigma2(
    base: &LinearSimConfig, sigma2s: &[f64], study: &StudyConfig,
) -> SimulationResult<StudyTable<LinearSimConfig>> {
    let grid = sigma2s.iter().map(|&s| base.with_sigma2(s)).collect::<SimulationResult<Vec<_>>>()?;
    slope_study(&grid, study)
}

/// OLS slope across replicates for each sample size in `ns`.
pub fn slope_study_over_n(
    base: &LinearSimConfig, ns: &[usize], study: &StudyConfig,
) -> SimulationResult<StudyTable<LinearSimConfig>> {
    let grid = ns.iter().map(|&n| base.with_n(n)).collect::<SimulationResult<Vec<_>>>()?;
    slope_study(&grid, study)
}

fn slope_study(
    grid: &[LinearSimConfig], study: &StudyConfig,
) -> SimulationResult<StudyTable<LinearSimConfig>> {
    run_study(grid, study, |cfg, rng| Ok(simulate_and_fit(cfg, rng)?.slope))
}

/// Numerical MLE of `σ²` from `n` draws of `N(mean, variance)`, for each `n`.
///
/// Every replicate minimizes [`NormalNll`] from `(0, 1)` with `σ² > 0`
/// enforced through [`Bounds`]. The row means approach
/// `variance · (n − 1)/n`.
///
/// # Errors
/// - [`SimulationError::InvalidArgument`] for a sample size below 2.
/// - [`SimulationError::MonteCarlo`] for invalid `mean`/`variance`.
/// - [`SimulationError::Optimization`] if any fit fails to converge.
pub fn variance_mle_study(
    mean: f64, variance: f64, ns: &[usize], study: &StudyConfig, opts: &MLEOptions,
) -> SimulationResult<StudyTable<usize>> {
    let source = VariateSource::normal(mean, variance.sqrt())?;
    if let Some(&n) = ns.iter().find(|&&n| n < 2) {
        return Err(SimulationError::InvalidArgument {
            arg: "ns",
            reason: format!("variance estimation needs at least two draws, got {n}"),
        });
    }
    let bounds = Bounds::new(vec![None, Some(0.0)], vec![None, None])?;
    run_study(ns, study, |&n, rng| {
        let sample = source.sample(n, rng)?;
        let fit = minimize(&NormalNll, array![0.0, 1.0], &sample, &bounds, opts)?;
        Ok(fit.theta_hat[1])
    })
}

/// `|estimate − Φ-based exact value|` of `P(lo ≤ X ≤ hi)`, `X ~ N(mean, sd²)`,
/// for each number of draws in `ns`.
///
/// # Errors
/// Parameter and interval errors surface before any replicate runs; a zero
/// in `ns` is reported as [`SimulationError::MonteCarlo`].
pub fn interval_error_study(
    mean: f64, sd: f64, lo: f64, hi: f64, ns: &[usize], study: &StudyConfig,
) -> SimulationResult<StudyTable<usize>> {
    let exact = normal_interval_probability(mean, sd, lo, hi)?;
    let source = VariateSource::normal(mean, sd)?;
    run_study(ns, study, |&n, rng| {
        let est = estimate_interval_probability(&source, lo, hi, n, rng)?;
        Ok((est.value - exact).abs())
    })
}

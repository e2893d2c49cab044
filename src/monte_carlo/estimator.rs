//! monte_carlo::estimator — sample-mean estimators with Monte Carlo error.
//!
//! Purpose
//! -------
//! Estimate expectations `E[f(X)]`, event probabilities, and definite
//! integrals by averaging over independent draws, and report the Monte Carlo
//! standard error alongside each point estimate.
//!
//! Key behaviors
//! -------------
//! - [`estimate_with`] is the general form: any trial closure that consumes
//!   randomness and returns a real number. The other estimators are thin
//!   wrappers around it.
//! - Moments are accumulated with Welford's update, so long runs do not lose
//!   precision to a naive sum of squares.
//! - [`normal_interval_probability`] gives the closed-form reference
//!   `Φ((hi−μ)/σ) − Φ((lo−μ)/σ)` for checking interval estimates.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n == 0` and malformed intervals are rejected before the first draw.
//! - `std_error` uses the unbiased (`n − 1`) sample variance and is `0` for
//!   `n == 1`.
//! - Interval membership is closed: `lo ≤ x ≤ hi`.
use crate::monte_carlo::{
    errors::{McError, McResult},
    variates::VariateSource,
};
use rand::Rng;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided 95 % standard-normal quantile.
const Z_95: f64 = 1.959_963_984_540_054;

/// Point estimate with its Monte Carlo uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub value: f64,
    pub std_error: f64,
    pub samples: usize,
    /// Normal-approximation 95 % interval `value ± 1.96·std_error`.
    pub confidence_interval: (f64, f64),
}

impl Estimate {
    fn from_moments(mean: f64, m2: f64, n: usize) -> Self {
        let var = if n > 1 { m2 / (n - 1) as f64 } else { 0.0 };
        let std_error = (var / n as f64).sqrt();
        let half = Z_95 * std_error;
        Self {
            value: mean,
            std_error,
            samples: n,
            confidence_interval: (mean - half, mean + half),
        }
    }

    fn scaled(self, factor: f64) -> Self {
        let (lo, hi) = (self.confidence_interval.0 * factor, self.confidence_interval.1 * factor);
        Self {
            value: self.value * factor,
            std_error: self.std_error * factor.abs(),
            samples: self.samples,
            confidence_interval: (lo.min(hi), lo.max(hi)),
        }
    }
}

/// estimate_with — Monte Carlo average of an arbitrary trial.
///
/// Purpose
/// -------
/// Average `n` independent evaluations of `trial` and attach the Monte Carlo
/// standard error and a normal-approximation 95 % interval.
///
/// Parameters
/// ----------
/// - `n`: `usize`  
///   Number of trials; must be positive.
/// - `rng`: `&mut R`  
///   Source of randomness, handed to every trial in turn.
/// - `trial`: `FnMut(&mut R) -> f64`  
///   One realization of the quantity being averaged.
///
/// Returns
/// -------
/// `McResult<Estimate>`  
///   - `Ok(est)` with `est.samples == n` and `std_error = s / sqrt(n)`,
///     where `s²` is the `n − 1` sample variance (`0` when `n == 1`).
///
/// Errors
/// ------
/// - [`McError::InvalidArgument`]  
///   `n == 0`; `trial` is never called and `rng` is not advanced.
///
/// Panics
/// ------
/// - Only if `trial` panics.
///
/// Notes
/// -----
/// - Moments use Welford's update. Non-finite trial values propagate into
///   the estimate rather than being filtered.
pub fn estimate_with<R, T>(n: usize, rng: &mut R, mut trial: T) -> McResult<Estimate>
where
    R: Rng + ?Sized,
    T: FnMut(&mut R) -> f64,
{
    check_sample_count(n)?;
    let (mut mean, mut m2) = (0.0_f64, 0.0_f64);
    for k in 1..=n {
        let x = trial(rng);
        let delta = x - mean;
        mean += delta / k as f64;
        m2 += delta * (x - mean);
    }
    Ok(Estimate::from_moments(mean, m2, n))
}

/// Estimate `E[f(X)]` for `X` drawn from `source`.
///
/// # Errors
/// [`McError::InvalidArgument`] if `n == 0`.
pub fn estimate_mean<R, F>(
    source: &VariateSource, f: F, n: usize, rng: &mut R,
) -> McResult<Estimate>
where
    R: Rng + ?Sized,
    F: Fn(f64) -> f64,
{
    estimate_with(n, rng, |r| f(source.draw(r)))
}

/// Estimate `P(pred(X))` as the mean of an indicator.
///
/// # Errors
/// [`McError::InvalidArgument`] if `n == 0`.
pub fn estimate_probability<R, P>(
    source: &VariateSource, pred: P, n: usize, rng: &mut R,
) -> McResult<Estimate>
where
    R: Rng + ?Sized,
    P: Fn(f64) -> bool,
{
    estimate_mean(source, |x| if pred(x) { 1.0 } else { 0.0 }, n, rng)
}

/// Estimate `P(lo ≤ X ≤ hi)`.
///
/// # Errors
/// - [`McError::InvalidArgument`] if `n == 0`, an end is NaN, or `lo > hi`.
pub fn estimate_interval_probability<R: Rng + ?Sized>(
    source: &VariateSource, lo: f64, hi: f64, n: usize, rng: &mut R,
) -> McResult<Estimate> {
    check_interval(lo, hi)?;
    estimate_probability(source, |x| lo <= x && x <= hi, n, rng)
}

/// Estimate `∫_lo^hi g(x) dx` as `(hi − lo)·mean(g(U))`, `U ~ Uniform(lo, hi)`.
///
/// # Errors
/// - [`McError::InvalidArgument`] if `n == 0`.
/// - [`McError::InvalidParameter`] unless `lo < hi`, both finite.
pub fn integrate<R, G>(g: G, lo: f64, hi: f64, n: usize, rng: &mut R) -> McResult<Estimate>
where
    R: Rng + ?Sized,
    G: Fn(f64) -> f64,
{
    check_sample_count(n)?;
    let source = VariateSource::uniform(lo, hi)?;
    Ok(estimate_mean(&source, g, n, rng)?.scaled(hi - lo))
}

/// Exact `P(lo ≤ X ≤ hi)` for `X ~ N(mean, sd²)`.
///
/// # Errors
/// - [`McError::InvalidParameter`] for a non-finite mean or `sd ≤ 0`.
/// - [`McError::InvalidArgument`] for a NaN end or `lo > hi`.
pub fn normal_interval_probability(mean: f64, sd: f64, lo: f64, hi: f64) -> McResult<f64> {
    check_interval(lo, hi)?;
    if !mean.is_finite() {
        return Err(McError::InvalidParameter {
            param: "mean",
            value: mean,
            reason: "must be finite",
        });
    }
    if !sd.is_finite() || sd <= 0.0 {
        return Err(McError::InvalidParameter {
            param: "sd",
            value: sd,
            reason: "must be finite and strictly positive",
        });
    }
    let normal = Normal::new(mean, sd).map_err(|_| McError::InvalidParameter {
        param: "sd",
        value: sd,
        reason: "rejected by the normal CDF",
    })?;
    Ok(normal.cdf(hi) - normal.cdf(lo))
}

// ---- Helper methods ----

fn check_sample_count(n: usize) -> McResult<()> {
    if n == 0 {
        return Err(McError::InvalidArgument {
            arg: "n",
            reason: "number of Monte Carlo samples must be positive".to_string(),
        });
    }
    Ok(())
}

fn check_interval(lo: f64, hi: f64) -> McResult<()> {
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return Err(McError::InvalidArgument {
            arg: "interval",
            reason: format!("expected lo <= hi, got [{lo}, {hi}]"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monte_carlo::rng::SimRng;
    use approx::assert_abs_diff_eq;
    use rand::RngCore;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Zero-sample and malformed-interval rejection before any draw.
    // - Welford moments against a hand-computed example.
    // - Interval probabilities and integrals against closed forms.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `n = 0` is an `InvalidArgument` and leaves the generator untouched.
    fn zero_samples_is_invalid_argument() {
        let src = VariateSource::normal(0.0, 1.0).unwrap();
        let mut rng = SimRng::new(3);

        let err = estimate_interval_probability(&src, -1.0, 1.0, 0, &mut rng).unwrap_err();

        assert!(matches!(err, McError::InvalidArgument { arg: "n", .. }));
        assert!(matches!(
            integrate(|x| x, 0.0, 1.0, 0, &mut rng),
            Err(McError::InvalidArgument { .. })
        ));
        assert_eq!(rng.next_u64(), SimRng::new(3).next_u64());
    }

    #[test]
    // Purpose
    // -------
    // Mean and standard error follow the textbook formulas.
    //
    // Given
    // -----
    // - A deterministic trial returning 1, 2, 3, 4 in turn.
    //
    // Expect
    // ------
    // - value = 2.5, std_error = sqrt((5/3)/4), CI symmetric around 2.5.
    fn welford_moments_match_hand_computation() {
        let mut k = 0.0;
        let est = estimate_with(4, &mut SimRng::new(0), |_| {
            k += 1.0;
            k
        })
        .unwrap();

        assert_abs_diff_eq!(est.value, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(est.std_error, (5.0_f64 / 3.0 / 4.0).sqrt(), epsilon = 1e-12);
        let (lo, hi) = est.confidence_interval;
        assert_abs_diff_eq!(est.value - lo, hi - est.value, epsilon = 1e-12);
        assert_eq!(est.samples, 4);
    }

    #[test]
    // Purpose
    // -------
    // The interval estimate for N(0, 1) on [-1, 1] lands near the CDF value.
    //
    // Given
    // -----
    // - 50 000 draws; exact value ≈ 0.6827.
    //
    // Expect
    // ------
    // - |estimate − exact| < 5 standard errors.
    fn interval_probability_matches_normal_cdf() {
        let src = VariateSource::normal(0.0, 1.0).unwrap();
        let exact = normal_interval_probability(0.0, 1.0, -1.0, 1.0).unwrap();

        let est =
            estimate_interval_probability(&src, -1.0, 1.0, 50_000, &mut SimRng::new(1)).unwrap();

        assert_abs_diff_eq!(exact, 0.682_689_492_137_086, epsilon = 1e-9);
        assert!((est.value - exact).abs() < 5.0 * est.std_error, "{est:?}");
    }

    #[test]
    // Purpose
    // -------
    // Monte Carlo integration of x² on [0, 3] approaches 9.
    fn integrate_recovers_polynomial_integral() {
        let est = integrate(|x| x * x, 0.0, 3.0, 40_000, &mut SimRng::new(8)).unwrap();

        assert!((est.value - 9.0).abs() < 5.0 * est.std_error, "{est:?}");
        assert!(est.confidence_interval.0 < est.value && est.value < est.confidence_interval.1);
    }

    #[test]
    // Purpose
    // -------
    // Reversed intervals and bad normal parameters are rejected.
    fn malformed_intervals_and_parameters_are_rejected() {
        assert!(matches!(
            normal_interval_probability(0.0, 1.0, 1.0, -1.0),
            Err(McError::InvalidArgument { .. })
        ));
        assert!(matches!(
            normal_interval_probability(0.0, 0.0, -1.0, 1.0),
            Err(McError::InvalidParameter { param: "sd", .. })
        ));
        assert!(matches!(
            integrate(|x| x, 2.0, 1.0, 10, &mut SimRng::new(0)),
            Err(McError::InvalidParameter { .. })
        ));
        assert!(matches!(
            integrate(|x| x, -1e308, 1e308, 10, &mut SimRng::new(0)),
            Err(McError::InvalidParameter { param: "hi", .. })
        ));
    }
}

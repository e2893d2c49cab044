//! monte_carlo::variates — validated distribution families for sampling.
//!
//! Purpose
//! -------
//! Describe the distributions the practicals draw from and produce
//! independent samples from an explicit generator handle.
//!
//! Key behaviors
//! -------------
//! - Families: normal, continuous uniform, binomial, and weighted categorical
//!   over arbitrary real outcomes.
//! - All parameter checks happen in the constructors; once a
//!   [`VariateSource`] exists, drawing from it cannot fail.
//! - Categorical weights are normalized internally, so `[1, 3]` and
//!   `[0.25, 0.75]` describe the same law.
//!
//! Invariants & assumptions
//! ------------------------
//! - Normal: `mean` finite, `sd` finite and `> 0`.
//! - Uniform: `lo < hi`, both finite.
//! - Binomial: `p ∈ [0, 1]`.
//! - Weighted: equal-length non-empty outcomes and weights; outcomes finite;
//!   weights finite, non-negative, and not all zero.
//!
//! Conventions
//! -----------
//! - Every draw is returned as `f64`; binomial counts and categorical
//!   outcomes are converted exactly.
use crate::monte_carlo::errors::{McError, McResult};
use ndarray::Array1;
use rand::Rng;
use rand_distr::{Binomial, Distribution, Normal, Uniform, WeightedIndex};

#[derive(Debug, Clone)]
enum Family {
    Normal { mean: f64, sd: f64, dist: Normal<f64> },
    Uniform { lo: f64, hi: f64, dist: Uniform<f64> },
    Binomial { trials: u64, p: f64, dist: Binomial },
    Weighted { outcomes: Vec<f64>, probs: Vec<f64>, dist: WeightedIndex<f64> },
}

/// A validated distribution ready to draw from.
#[derive(Debug, Clone)]
pub struct VariateSource {
    family: Family,
}

impl VariateSource {
    /// `N(mean, sd²)`.
    ///
    /// # Errors
    /// [`McError::InvalidParameter`] unless `mean` is finite and `sd` is
    /// finite and strictly positive.
    pub fn normal(mean: f64, sd: f64) -> McResult<Self> {
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
        let dist = Normal::new(mean, sd).map_err(|_| McError::InvalidParameter {
            param: "sd",
            value: sd,
            reason: "rejected by the normal sampler",
        })?;
        Ok(Self { family: Family::Normal { mean, sd, dist } })
    }

    /// Continuous uniform on `[lo, hi)`.
    ///
    /// # Errors
    /// [`McError::InvalidParameter`] unless both ends are finite, `lo < hi`,
    /// and the width `hi − lo` is itself finite.
    pub fn uniform(lo: f64, hi: f64) -> McResult<Self> {
        if !lo.is_finite() {
            return Err(McError::InvalidParameter {
                param: "lo",
                value: lo,
                reason: "must be finite",
            });
        }
        if !hi.is_finite() || hi <= lo {
            return Err(McError::InvalidParameter {
                param: "hi",
                value: hi,
                reason: "must be finite and greater than lo",
            });
        }
        if !(hi - lo).is_finite() {
            return Err(McError::InvalidParameter {
                param: "hi",
                value: hi,
                reason: "interval width hi - lo overflows",
            });
        }
        Ok(Self { family: Family::Uniform { lo, hi, dist: Uniform::new(lo, hi) } })
    }

    /// Number of successes in `trials` Bernoulli(`p`) trials.
    ///
    /// # Errors
    /// [`McError::InvalidParameter`] unless `0 ≤ p ≤ 1`.
    pub fn binomial(trials: u64, p: f64) -> McResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(McError::InvalidParameter {
                param: "p",
                value: p,
                reason: "must lie in [0, 1]",
            });
        }
        let dist = Binomial::new(trials, p).map_err(|_| McError::InvalidParameter {
            param: "p",
            value: p,
            reason: "rejected by the binomial sampler",
        })?;
        Ok(Self { family: Family::Binomial { trials, p, dist } })
    }

    /// Categorical law over `outcomes` with relative `weights`.
    ///
    /// # Errors
    /// - [`McError::InvalidArgument`] if the slices are empty or differ in
    ///   length.
    /// - [`McError::InvalidParameter`] for a non-finite outcome, a negative or
    ///   non-finite weight, an all-zero weight vector, or weights whose sum
    ///   overflows.
    pub fn weighted(outcomes: &[f64], weights: &[f64]) -> McResult<Self> {
        if outcomes.is_empty() || outcomes.len() != weights.len() {
            return Err(McError::InvalidArgument {
                arg: "weights",
                reason: format!(
                    "need one weight per outcome, got {} outcomes and {} weights",
                    outcomes.len(),
                    weights.len()
                ),
            });
        }
        if let Some(&bad) = outcomes.iter().find(|o| !o.is_finite()) {
            return Err(McError::InvalidParameter {
                param: "outcomes",
                value: bad,
                reason: "outcomes must be finite",
            });
        }
        if let Some(&bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(McError::InvalidParameter {
                param: "weights",
                value: bad,
                reason: "weights must be finite and non-negative",
            });
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(McError::InvalidParameter {
                param: "weights",
                value: total,
                reason: "weights must not sum to zero",
            });
        }
        if !total.is_finite() {
            return Err(McError::InvalidParameter {
                param: "weights",
                value: total,
                reason: "sum of weights overflows",
            });
        }
        let dist = WeightedIndex::new(weights).map_err(|_| McError::InvalidParameter {
            param: "weights",
            value: total,
            reason: "rejected by the categorical sampler",
        })?;
        Ok(Self {
            family: Family::Weighted {
                outcomes: outcomes.to_vec(),
                probs: weights.iter().map(|w| w / total).collect(),
                dist,
            },
        })
    }

    /// One draw.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.family {
            Family::Normal { dist, .. } => dist.sample(rng),
            Family::Uniform { dist, .. } => dist.sample(rng),
            Family::Binomial { dist, .. } => dist.sample(rng) as f64,
            Family::Weighted { outcomes, dist, .. } => outcomes[dist.sample(rng)],
        }
    }

    /// `n` independent draws.
    ///
    /// # Errors
    /// [`McError::InvalidArgument`] if `n == 0`; the generator is not touched.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> McResult<Array1<f64>> {
        if n == 0 {
            return Err(McError::InvalidArgument {
                arg: "n",
                reason: "sample size must be positive".to_string(),
            });
        }
        Ok(Array1::from_iter((0..n).map(|_| self.draw(rng))))
    }

    /// Population mean of the distribution.
    pub fn mean(&self) -> f64 {
        match &self.family {
            Family::Normal { mean, .. } => *mean,
            Family::Uniform { lo, hi, .. } => 0.5 * (lo + hi),
            Family::Binomial { trials, p, .. } => *trials as f64 * p,
            Family::Weighted { outcomes, probs, .. } => {
                outcomes.iter().zip(probs.iter()).map(|(o, p)| o * p).sum()
            }
        }
    }

    /// Population standard deviation of the distribution.
    pub fn std_dev(&self) -> f64 {
        match &self.family {
            Family::Normal { sd, .. } => *sd,
            Family::Uniform { lo, hi, .. } => (hi - lo) / 12f64.sqrt(),
            Family::Binomial { trials, p, .. } => (*trials as f64 * p * (1.0 - p)).sqrt(),
            Family::Weighted { outcomes, probs, .. } => {
                let m = self.mean();
                let var: f64 =
                    outcomes.iter().zip(probs.iter()).map(|(o, p)| p * (o - m) * (o - m)).sum();
                var.sqrt()
            }
        }
    }
}

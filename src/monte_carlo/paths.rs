//! monte_carlo::paths — path-dependent outcomes of multi-step games.
//!
//! A path is the full sequence of step values of one play. Its running
//! cumulative sum is the player's bankroll after each step. A
//! [`PathPolicy`] turns the path into a payoff:
//!
//! - [`PathPolicy::Final`]: the final cumulative value.
//! - [`PathPolicy::Bust`]: `0` if the running sum is `≤ 0` at **any** step,
//!   otherwise the final cumulative value.
//!
//! The bust rule is decided on the whole running-sum path, never on the
//! final value alone: `[-1, -1, 2, 2, 2]` ends at `4` but still busts.
use crate::monte_carlo::{
    errors::{McError, McResult},
    estimator::{Estimate, estimate_with},
    variates::VariateSource,
};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathPolicy {
    Final,
    Bust,
}

/// Cumulative sums `s₁ = x₁, s₂ = x₁ + x₂, …`.
pub fn running_sums(steps: &[f64]) -> Vec<f64> {
    steps
        .iter()
        .scan(0.0, |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Payoff of one path under `policy`.
///
/// # Errors
/// [`McError::InvalidArgument`] for an empty path.
pub fn evaluate_path(steps: &[f64], policy: PathPolicy) -> McResult<f64> {
    if steps.is_empty() {
        return Err(McError::InvalidArgument {
            arg: "steps",
            reason: "a path needs at least one step".to_string(),
        });
    }
    Ok(score(&running_sums(steps), policy))
}

fn score(sums: &[f64], policy: PathPolicy) -> f64 {
    let last = sums.last().copied().unwrap_or(0.0);
    match policy {
        PathPolicy::Final => last,
        PathPolicy::Bust if sums.iter().any(|&s| s <= 0.0) => 0.0,
        PathPolicy::Bust => last,
    }
}

/// A fixed number of independent spins of a weighted wheel.
#[derive(Debug, Clone)]
pub struct SpinGame {
    wheel: VariateSource,
    spins: usize,
    policy: PathPolicy,
}

impl SpinGame {
    /// # Errors
    /// - [`McError::InvalidArgument`] if `spins == 0`, or from the wheel.
    /// - [`McError::InvalidParameter`] from [`VariateSource::weighted`].
    pub fn new(
        outcomes: &[f64], weights: &[f64], spins: usize, policy: PathPolicy,
    ) -> McResult<Self> {
        if spins == 0 {
            return Err(McError::InvalidArgument {
                arg: "spins",
                reason: "a game needs at least one spin".to_string(),
            });
        }
        let wheel = VariateSource::weighted(outcomes, weights)?;
        Ok(Self { wheel, spins, policy })
    }

    pub fn spins(&self) -> usize {
        self.spins
    }

    pub fn policy(&self) -> PathPolicy {
        self.policy
    }

    /// Step values of one play.
    pub fn simulate_path<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..self.spins).map(|_| self.wheel.draw(rng)).collect()
    }

    /// Payoff of one play.
    pub fn play<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        score(&running_sums(&self.simulate_path(rng)), self.policy)
    }

    /// Expected payoff over `n` independent plays.
    ///
    /// # Errors
    /// [`McError::InvalidArgument`] if `n == 0`.
    pub fn estimate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> McResult<Estimate> {
        estimate_with(n, rng, |r| self.play(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monte_carlo::rng::SimRng;
    use proptest::prelude::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The bust rule on paths that recover after an early dip.
    // - Touching zero counting as bust.
    // - Spin-game construction and estimation against exact expectations.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An early dip busts the path even though it ends positive.
    //
    // Given
    // -----
    // - Steps [-1, -1, 2, 2, 2]: running sums [-1, -2, 0, 2, 4].
    //
    // Expect
    // ------
    // - Bust ⇒ 0, Final ⇒ 4.
    fn early_dip_busts_despite_positive_final_value() {
        let steps = [-1.0, -1.0, 2.0, 2.0, 2.0];

        assert_eq!(running_sums(&steps), vec![-1.0, -2.0, 0.0, 2.0, 4.0]);
        assert_eq!(evaluate_path(&steps, PathPolicy::Bust).unwrap(), 0.0);
        assert_eq!(evaluate_path(&steps, PathPolicy::Final).unwrap(), 4.0);
    }

    #[test]
    // Purpose
    // -------
    // A running sum of exactly zero is a bust; a strictly positive path is not.
    fn touching_zero_busts_and_positive_path_survives() {
        assert_eq!(evaluate_path(&[1.0, -1.0, 5.0], PathPolicy::Bust).unwrap(), 0.0);
        assert_eq!(evaluate_path(&[2.0, -1.0, 3.0], PathPolicy::Bust).unwrap(), 4.0);
        assert!(matches!(
            evaluate_path(&[], PathPolicy::Final),
            Err(McError::InvalidArgument { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Game validation and a degenerate game with a known payoff.
    //
    // Given
    // -----
    // - A wheel that always lands on 3 (other outcome has zero weight).
    //
    // Expect
    // ------
    // - Zero spins is rejected; every play pays 3·spins under either policy.
    fn spin_game_validates_and_plays_deterministic_wheel() {
        assert!(matches!(
            SpinGame::new(&[1.0], &[1.0], 0, PathPolicy::Final),
            Err(McError::InvalidArgument { arg: "spins", .. })
        ));

        let game = SpinGame::new(&[-5.0, 3.0], &[0.0, 1.0], 4, PathPolicy::Bust).unwrap();
        let est = game.estimate(100, &mut SimRng::new(1)).unwrap();

        assert_eq!(est.value, 12.0);
        assert_eq!(est.std_error, 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The final-value game's mean matches spins × wheel mean.
    //
    // Given
    // -----
    // - Wheel {-1, 2} with weights {2, 1} (mean 0), 5 spins, 40 000 plays.
    //
    // Expect
    // ------
    // - Final: |estimate − 0| < 5 standard errors.
    // - Bust: |estimate − 2/3| < 5 standard errors (exact value by enumerating
    //   all 32 paths).
    fn final_value_game_matches_linear_expectation() {
        let fin = SpinGame::new(&[-1.0, 2.0], &[2.0, 1.0], 5, PathPolicy::Final).unwrap();
        let bust = SpinGame::new(&[-1.0, 2.0], &[2.0, 1.0], 5, PathPolicy::Bust).unwrap();

        let e_fin = fin.estimate(40_000, &mut SimRng::new(77)).unwrap();
        let e_bust = bust.estimate(40_000, &mut SimRng::new(77)).unwrap();

        assert!(e_fin.value.abs() < 5.0 * e_fin.std_error, "{e_fin:?}");
        assert!((e_bust.value - 2.0 / 3.0).abs() < 5.0 * e_bust.std_error, "{e_bust:?}");
    }

    proptest! {
        #[test]
        // Purpose
        // -------
        // Bust pays zero exactly when some prefix sum is non-positive, and the
        // final value otherwise.
        fn bust_is_zero_iff_some_prefix_is_non_positive(
            steps in proptest::collection::vec(-5i32..6, 1..20),
        ) {
            let steps: Vec<f64> = steps.into_iter().map(f64::from).collect();
            let sums = running_sums(&steps);
            let dipped = sums.iter().any(|&s| s <= 0.0);

            let bust = evaluate_path(&steps, PathPolicy::Bust).unwrap();
            let fin = evaluate_path(&steps, PathPolicy::Final).unwrap();

            if dipped {
                prop_assert_eq!(bust, 0.0);
            } else {
                prop_assert_eq!(bust, fin);
                prop_assert!(fin > 0.0);
            }
        }
    }
}

//! simulation::harness — replicate grids of independent simulation runs.
//!
//! Purpose
//! -------
//! Run a user-supplied replicate function `R` times at every point of a
//! configuration grid and collect the outcomes into a [`StudyTable`] that a
//! reporting layer can consume without further computation.
//!
//! Key behaviors
//! -------------
//! - Replicate `r` at grid index `g` always draws from
//!   `SimRng::for_stream(seed, g · R + r)`. No generator is shared between
//!   replicates.
//! - [`run_study`] walks the grid sequentially; [`run_study_parallel`] fans
//!   every `(g, r)` pair out over rayon. Both return identical tables.
//! - Rows keep grid order and outcomes keep replicate order.
//!
//! Invariants & assumptions
//! ------------------------
//! - An empty grid or `replicates == 0` is rejected before any replicate runs.
//! - The first failing replicate (in `(g, r)` order) aborts the study and its
//!   error is returned unchanged; no partial table is produced.
//! - Row `std_dev` is the population standard deviation of the outcomes.
//!
//! Downstream usage
//! ----------------
//! - Build one config value per grid point (e.g. a [`LinearSimConfig`]
//!   variant) and pass a closure that simulates and summarizes one replicate.
//!
//! [`LinearSimConfig`]: crate::simulation::regression::LinearSimConfig
use crate::monte_carlo::rng::SimRng;
use crate::simulation::{
    errors::{SimulationError, SimulationResult},
    summary::{mean, std_dev},
};
use rayon::prelude::*;
use serde::Serialize;

/// Replicate count and master seed shared by every grid point of a study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudyConfig {
    pub replicates: usize,
    pub seed: u64,
}

impl StudyConfig {
    /// # Errors
    /// [`SimulationError::InvalidArgument`] if `replicates == 0`.
    pub fn new(replicates: usize, seed: u64) -> SimulationResult<Self> {
        let cfg = Self { replicates, seed };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> SimulationResult<()> {
        if self.replicates == 0 {
            return Err(SimulationError::InvalidArgument {
                arg: "replicates",
                reason: "a study needs at least one replicate per grid point".to_string(),
            });
        }
        Ok(())
    }

    /// Generator for replicate `replicate` at grid index `grid_index`.
    pub fn rng_for(&self, grid_index: usize, replicate: usize) -> SimRng {
        SimRng::for_stream(self.seed, (grid_index * self.replicates + replicate) as u64)
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self { replicates: 100, seed: 42 }
    }
}

/// Outcomes at one grid point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow<C> {
    pub config: C,
    pub outcomes: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
}

impl<C> GridRow<C> {
    fn from_outcomes(config: C, outcomes: Vec<f64>) -> SimulationResult<Self> {
        let (m, sd) = (mean(&outcomes)?, std_dev(&outcomes)?);
        Ok(Self { config, outcomes, mean: m, std_dev: sd })
    }
}

/// One row per grid point, in grid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyTable<C> {
    pub rows: Vec<GridRow<C>>,
}

impl<C> StudyTable<C> {
    /// `(config, mean, std_dev)` triples for plotting.
    pub fn summary(&self) -> Vec<(&C, f64, f64)> {
        self.rows.iter().map(|row| (&row.config, row.mean, row.std_dev)).collect()
    }
}

/// run_study — sequential grid × replicate simulation study.
///
/// Purpose
/// -------
/// Evaluate `replicate` `cfg.replicates` times at every grid point and
/// summarize each point's outcomes into a [`GridRow`].
///
/// Parameters
/// ----------
/// - `grid`: `&[C]`  
///   Configurations to study. Row `g` of the result corresponds to
///   `grid[g]`.
/// - `cfg`: `&StudyConfig`  
///   Replicate count `R` and master seed.
/// - `replicate`: `Fn(&C, &mut SimRng) -> SimulationResult<f64>`  
///   Runs one replicate. It receives a fresh generator on stream
///   `g · R + r` and returns a scalar outcome.
///
/// Returns
/// -------
/// `SimulationResult<StudyTable<C>>`  
///   - `Ok(table)` with one row per grid point in grid order, each row's
///     outcomes in replicate order with their mean and population SD.
///
/// Errors
/// ------
/// - [`SimulationError::InvalidArgument`]  
///   Empty grid or `cfg.replicates == 0`; nothing is run.
/// - The first error returned by `replicate`, unchanged. No partial table
///   is returned.
///
/// Panics
/// ------
/// - Only if `replicate` panics.
///
/// Notes
/// -----
/// - Each completed row emits a `tracing` debug event.
/// - Results depend only on `cfg.seed` and the grid, so reruns are
///   bit-identical and match [`run_study_parallel`].
///
/// Examples
/// --------
/// ```
/// use rust_simstats::monte_carlo::{SimRng, VariateSource};
/// use rust_simstats::simulation::{StudyConfig, run_study};
///
/// let cfg = StudyConfig::new(200, 5).unwrap();
/// let table = run_study(&[0.5_f64, 2.0], &cfg, |sd: &f64, rng: &mut SimRng| {
///     Ok(VariateSource::normal(0.0, *sd)?.draw(rng))
/// })
/// .unwrap();
/// assert_eq!(table.rows.len(), 2);
/// assert!(table.rows[0].std_dev < table.rows[1].std_dev);
/// ```
pub fn run_study<C, F>(
    grid: &[C], cfg: &StudyConfig, replicate: F,
) -> SimulationResult<StudyTable<C>>
where
    C: Clone,
    F: Fn(&C, &mut SimRng) -> SimulationResult<f64>,
{
    check_grid(grid, cfg)?;
    let mut rows = Vec::with_capacity(grid.len());
    for (gi, point) in grid.iter().enumerate() {
        let outcomes = (0..cfg.replicates)
            .map(|r| replicate(point, &mut cfg.rng_for(gi, r)))
            .collect::<SimulationResult<Vec<f64>>>()?;
        let row = GridRow::from_outcomes(point.clone(), outcomes)?;
        tracing::debug!(
            grid_index = gi,
            mean = row.mean,
            std_dev = row.std_dev,
            "study row complete"
        );
        rows.push(row);
    }
    Ok(StudyTable { rows })
}

/// run_study_parallel — rayon-parallel form of [`run_study`].
///
/// Purpose
/// -------
/// Spread every `(grid_index, replicate)` pair over the rayon thread pool
/// while returning exactly the table [`run_study`] would.
///
/// Parameters
/// ----------
/// - `grid`, `cfg`, `replicate`  
///   As for [`run_study`]; `C` and the closure must also be `Sync`.
///
/// Returns
/// -------
/// `SimulationResult<StudyTable<C>>`  
///   - `Ok(table)` equal to the sequential result for the same inputs.
///
/// Errors
/// ------
/// - As [`run_study`]. When several replicates fail, the one with the
///   smallest `(grid_index, replicate)` is reported, independent of thread
///   scheduling.
///
/// Panics
/// ------
/// - A panic in `replicate` is propagated by rayon to the caller.
///
/// Notes
/// -----
/// - Every replicate runs even if an earlier one fails; the error is chosen
///   after collection so that it is deterministic.
pub fn run_study_parallel<C, F>(
    grid: &[C], cfg: &StudyConfig, replicate: F,
) -> SimulationResult<StudyTable<C>>
where
    C: Clone + Sync,
    F: Fn(&C, &mut SimRng) -> SimulationResult<f64> + Sync,
{
    check_grid(grid, cfg)?;
    let r = cfg.replicates;
    let flat: Vec<SimulationResult<f64>> = (0..grid.len() * r)
        .into_par_iter()
        .map(|k| replicate(&grid[k / r], &mut cfg.rng_for(k / r, k % r)))
        .collect();
    let flat = flat.into_iter().collect::<SimulationResult<Vec<f64>>>()?;

    let rows = grid
        .iter()
        .zip(flat.chunks(r))
        .map(|(point, chunk)| GridRow::from_outcomes(point.clone(), chunk.to_vec()))
        .collect::<SimulationResult<Vec<_>>>()?;
    tracing::debug!(grid_points = rows.len(), replicates = r, "parallel study complete");
    Ok(StudyTable { rows })
}

fn check_grid<C>(grid: &[C], cfg: &StudyConfig) -> SimulationResult<()> {
    cfg.validate()?;
    if grid.is_empty() {
        return Err(SimulationError::InvalidArgument {
            arg: "grid",
            reason: "a study needs at least one configuration".to_string(),
        });
    }
    Ok(())
}

//! Error surface for simulation studies.
//!
//! Studies compose sampling and fitting, so [`SimulationError`] wraps both
//! lower-level enums unchanged and adds its own structural checks.
use crate::monte_carlo::errors::McError;
use crate::optimization::errors::OptError;
use thiserror::Error;

pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A study configuration is structurally invalid (empty grid, zero
    /// replicates, mismatched lengths).
    #[error("Invalid argument {arg}: {reason}")]
    InvalidArgument { arg: &'static str, reason: String },

    /// Sampling or estimation failed inside a replicate.
    #[error(transparent)]
    MonteCarlo(#[from] McError),

    /// Fitting failed inside a replicate.
    #[error(transparent)]
    Optimization(#[from] OptError),
}

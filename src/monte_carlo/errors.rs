//! Error surface for sampling and Monte Carlo estimation.
//!
//! Every check in this module family runs before the first draw, so a call
//! that returns an [`McError`] leaves its generator untouched.
use thiserror::Error;

/// Result alias for Monte Carlo operations.
pub type McResult<T> = Result<T, McError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum McError {
    /// A distribution parameter lies outside its domain.
    #[error("Invalid parameter {param} = {value}: {reason}")]
    InvalidParameter { param: &'static str, value: f64, reason: &'static str },

    /// A structural precondition is violated (zero samples, length mismatch).
    #[error("Invalid argument {arg}: {reason}")]
    InvalidArgument { arg: &'static str, reason: String },
}

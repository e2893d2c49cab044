//! Error surface for the optimizer, likelihood evaluators, and inference.
//!
//! Every fallible optimization entry point returns [`OptResult<T>`]. Backend
//! (argmin) errors are normalized into [`OptError`] exactly once, at the
//! solver boundary, via `From<argmin::core::Error>`. Errors raised by our own
//! cost or gradient code travel through argmin as `anyhow` payloads and are
//! recovered intact by the same conversion.
use argmin::core::{ArgminError, Error};
use thiserror::Error as ThisError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum OptError {
    // ---- Structural preconditions ----
    /// A structural precondition is violated (length mismatch, empty data).
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A likelihood parameter lies outside its domain.
    #[error("Invalid parameter at index {index}: {value}: {reason}")]
    InvalidParameter { index: usize, value: f64, reason: &'static str },

    /// Observations passed to an evaluator must be finite.
    #[error("Invalid data at index {index}: {value}, must be finite")]
    InvalidData { index: usize, value: f64 },

    // ---- Bounds ----
    /// Lower bound is not strictly below the upper bound.
    #[error("Invalid bounds at index {index}: lower {lower} must be < upper {upper}")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    /// Initial point must be finite and strictly inside its bounds.
    #[error("Initial point at index {index} ({value}) is not strictly inside its bounds")]
    InitialPointOutOfBounds { index: usize, value: f64 },

    // ---- Gradient ----
    /// Implies that FD should be used
    #[error("Gradient not implemented")]
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    #[error("Gradient dimension mismatch: expected {expected}, found {found}")]
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    #[error("Invalid gradient at index {index}: {value}: {reason}")]
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    #[error("Invalid gradient tolerance {tol}: {reason}")]
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Cost change tolerance needs to be positive and finite.
    #[error("Invalid cost function change tolerance {tol}: {reason}")]
    InvalidTolCost { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    #[error("Invalid maximum iterations {max_iter}: {reason}")]
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one tolerance must be provided.
    #[error("No tolerances provided")]
    NoTolerancesProvided,

    /// Invalid line searcher name.
    #[error("Invalid line searcher '{name}': {reason}")]
    InvalidLineSearch { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    #[error("Invalid L-BFGS memory {mem}: {reason}")]
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// The evaluator reported `+∞` (or NaN) at a point the optimizer proposed.
    #[error("Domain violation: negative log-likelihood is {value} at {theta:?}")]
    DomainViolation { theta: Vec<f64>, value: f64 },

    // ---- Optimizer outcome ----
    /// The solver stopped without meeting its convergence criteria.
    #[error("Optimizer did not converge after {iterations} iterations: {status}")]
    NonConvergence { status: String, iterations: usize },

    /// Estimated parameters must be finite.
    #[error("Invalid estimated parameter at index {index}: {value}: {reason}")]
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Theta hat is missing
    #[error("Missing estimated parameters (theta hat)")]
    MissingThetaHat,

    /// Minimum value reported by the solver is not finite.
    #[error("Non-finite minimum value: {value}")]
    NonFiniteCost { value: f64 },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    #[error("Backend rejected a parameter: {text}")]
    BackendInvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    #[error("Not implemented: {text}")]
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    #[error("Not initialized: {text}")]
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    #[error("Condition violated: {text}")]
    ConditionViolated { text: String },
    /// Wrapper for argmin::PotentialBug
    #[error("Potential bug: {text}")]
    PotentialBug { text: String },
    /// Wrapper for other argmin::Error types
    #[error("Backend error: {text}")]
    BackendError { text: String },

    // ---- Finite Diffs ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    #[error("Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}")]
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    #[error("Invalid Hessian at ({row}, {col}): {value}, must be finite")]
    InvalidHessian { row: usize, col: usize, value: f64 },
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => {
                    OptError::BackendInvalidParameter { text }
                }
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                other => OptError::BackendError { text: other.to_string() },
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

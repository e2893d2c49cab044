//! Summary statistics for replicate outcomes.
//!
//! `std_dev` is the population form (divide by `n`), which is what the
//! study tables report.
use crate::simulation::errors::{SimulationError, SimulationResult};
use ndarray::ArrayView1;

/// Arithmetic mean of the outcomes.
///
/// # Errors
/// [`SimulationError::InvalidArgument`] for an empty sample.
pub fn mean(xs: &[f64]) -> SimulationResult<f64> {
    ArrayView1::from(xs).mean().ok_or_else(|| empty_sample("xs"))
}

/// Population (`ddof = 0`) standard deviation of the outcomes.
///
/// # Errors
/// [`SimulationError::InvalidArgument`] for an empty sample.
pub fn std_dev(xs: &[f64]) -> SimulationResult<f64> {
    if xs.is_empty() {
        return Err(empty_sample("xs"));
    }
    Ok(ArrayView1::from(xs).std(0.0))
}

/// Pearson correlation of two equal-length samples.
///
/// # Errors
/// [`SimulationError::InvalidArgument`] for mismatched lengths, fewer than
/// two points, or a constant sample.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> SimulationResult<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(SimulationError::InvalidArgument {
            arg: "xs, ys",
            reason: format!(
                "need two equal-length samples of size >= 2, got {} and {}",
                xs.len(),
                ys.len()
            ),
        });
    }
    let dx = &ArrayView1::from(xs) - mean(xs)?;
    let dy = &ArrayView1::from(ys) - mean(ys)?;
    let (sxx, syy) = (dx.dot(&dx), dy.dot(&dy));
    if sxx == 0.0 || syy == 0.0 {
        return Err(SimulationError::InvalidArgument {
            arg: "xs, ys",
            reason: "correlation is undefined for a constant sample".to_string(),
        });
    }
    Ok(dx.dot(&dy) / (sxx * syy).sqrt())
}

fn empty_sample(arg: &'static str) -> SimulationError {
    SimulationError::InvalidArgument { arg, reason: "summary of an empty sample".to_string() }
}

//! Grid evaluation of two-parameter negative log-likelihoods.
//!
//! A [`LikelihoodSurface`] holds `NLL(a, b)` for every pair of a Cartesian
//! grid, in row-major order (`values[[i, j]] = NLL(first[i], second[j])`).
//! Points outside the support keep their `+∞` value so the surface can be
//! inspected or plotted downstream without special-casing.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::NegLogLikelihood,
};
use ndarray::{Array1, Array2, array};

#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodSurface {
    pub first: Array1<f64>,
    pub second: Array1<f64>,
    pub values: Array2<f64>,
}

impl LikelihoodSurface {
    /// Grid point with the smallest finite NLL as `(first, second, value)`.
    ///
    /// Returns `None` when every grid value is non-finite.
    pub fn grid_minimum(&self) -> Option<(f64, f64, f64)> {
        self.values
            .indexed_iter()
            .filter(|(_, v)| v.is_finite())
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|((i, j), &v)| (self.first[i], self.second[j], v))
    }
}

/// Evaluate a two-parameter NLL on the Cartesian product of two grids.
///
/// # Errors
/// - [`OptError::InvalidArgument`] if `f.dim() != 2` or a grid is empty.
/// - Any error the evaluator returns for a grid point.
pub fn evaluate_surface<F: NegLogLikelihood>(
    f: &F, data: &F::Data, first: &Array1<f64>, second: &Array1<f64>,
) -> OptResult<LikelihoodSurface> {
    if f.dim() != 2 {
        return Err(OptError::InvalidArgument {
            reason: format!("surface needs a two-parameter likelihood, got {}", f.dim()),
        });
    }
    if first.is_empty() || second.is_empty() {
        return Err(OptError::InvalidArgument {
            reason: "surface grids must be non-empty".to_string(),
        });
    }
    let mut values = Array2::<f64>::zeros((first.len(), second.len()));
    for (i, &a) in first.iter().enumerate() {
        for (j, &b) in second.iter().enumerate() {
            values[[i, j]] = f.value(&array![a, b], data)?;
        }
    }
    Ok(LikelihoodSurface { first: first.clone(), second: second.clone(), values })
}

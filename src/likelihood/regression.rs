//! likelihood::regression — simple linear regression with Gaussian errors.
//!
//! Model: `yᵢ = β₀ + β₁ xᵢ + εᵢ`, `εᵢ ~ N(0, σ²)` i.i.d., with parameter
//! vector `θ = (β₀, β₁, σ²)`.
//!
//! [`GaussianRegressionNll`] is the likelihood objective; [`fit_ols`] is the
//! closed-form least-squares fit, whose coefficients coincide with the
//! Gaussian MLE and whose `residual_variance` is the MLE of `σ²`.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{Cost, Grad, NegLogLikelihood, Theta, validation::validate_theta_len},
};
use crate::likelihood::normal::gaussian_nll;
use ndarray::{Array1, array};

/// Paired design/response vectors, validated once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionData {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl RegressionData {
    /// # Errors
    /// - [`OptError::InvalidArgument`] if the vectors are empty or differ in
    ///   length.
    /// - [`OptError::InvalidData`] for the first non-finite entry (indices
    ///   into `y` are offset by `x.len()`).
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> OptResult<Self> {
        if x.is_empty() || x.len() != y.len() {
            return Err(OptError::InvalidArgument {
                reason: format!(
                    "design and response must be non-empty and equal length, got {} and {}",
                    x.len(),
                    y.len()
                ),
            });
        }
        let mut values = x.iter().chain(y.iter()).enumerate();
        if let Some((index, &value)) = values.find(|(_, v)| !v.is_finite()) {
            return Err(OptError::InvalidData { index, value });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Gaussian negative log-likelihood of `(β₀, β₁, σ²)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GaussianRegressionNll;

impl NegLogLikelihood for GaussianRegressionNll {
    type Data = RegressionData;

    fn dim(&self) -> usize {
        3
    }

    fn value(&self, theta: &Theta, data: &RegressionData) -> OptResult<Cost> {
        validate_theta_len(theta, 3)?;
        let (b0, b1) = (theta[0], theta[1]);
        let x = &data.x;
        // gaussian_nll centres each y on its fitted value.
        gaussian_nll(&data.y, |i| b0 + b1 * x[i], theta[2], 2)
    }

    fn check(&self, theta: &Theta, _data: &RegressionData) -> OptResult<()> {
        validate_theta_len(theta, 3)?;
        match theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            Some((index, &value)) => Err(OptError::InvalidParameter {
                index,
                value,
                reason: "Initial parameters must be finite.",
            }),
            None => Ok(()),
        }
    }

    fn grad(&self, theta: &Theta, data: &RegressionData) -> OptResult<Grad> {
        validate_theta_len(theta, 3)?;
        let (b0, b1, s2) = (theta[0], theta[1], theta[2]);
        if !s2.is_finite() || s2 <= 0.0 {
            return Err(OptError::InvalidParameter {
                index: 2,
                value: s2,
                reason: "Error variance must be finite and strictly positive.",
            });
        }
        let n = data.len() as f64;
        let (mut sr, mut srx, mut srr) = (0.0, 0.0, 0.0);
        for (&xi, &yi) in data.x.iter().zip(data.y.iter()) {
            let r = yi - b0 - b1 * xi;
            sr += r;
            srx += r * xi;
            srr += r * r;
        }
        Ok(array![-sr / s2, -srx / s2, n / (2.0 * s2) - srr / (2.0 * s2 * s2)])
    }
}

/// Closed-form least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    pub intercept: f64,
    pub slope: f64,
    /// `Σ rᵢ² / n`, the maximum-likelihood error variance.
    pub residual_variance: f64,
}

impl OlsFit {
    /// Parameter vector `(β₀, β₁, σ²)` in [`GaussianRegressionNll`] order.
    pub fn to_theta(&self) -> Theta {
        array![self.intercept, self.slope, self.residual_variance]
    }
}

/// Fit `y = β₀ + β₁ x` by ordinary least squares.
///
/// # Errors
/// [`OptError::InvalidArgument`] when the design has zero spread, in which
/// case the slope is not identified.
pub fn fit_ols(data: &RegressionData) -> OptResult<OlsFit> {
    let n = data.len() as f64;
    let x_bar = data.x.sum() / n;
    let y_bar = data.y.sum() / n;
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (&xi, &yi) in data.x.iter().zip(data.y.iter()) {
        sxx += (xi - x_bar) * (xi - x_bar);
        sxy += (xi - x_bar) * (yi - y_bar);
    }
    if sxx <= 0.0 {
        return Err(OptError::InvalidArgument {
            reason: "design vector has zero variance; slope is not identified".to_string(),
        });
    }
    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;
    let residual_variance = data
        .x
        .iter()
        .zip(data.y.iter())
        .map(|(&xi, &yi)| {
            let r = yi - intercept - slope * xi;
            r * r
        })
        .sum::<f64>()
        / n;
    Ok(OlsFit { intercept, slope, residual_variance })
}

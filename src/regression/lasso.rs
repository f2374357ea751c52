//! Sparse lasso regression via cyclic coordinate descent

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rayon::prelude::*;

use crate::{EncodingError, Result};

use super::{column_means, validate_training_pair, LinearModel, Regressor};

/// Default sweep limit for coordinate descent
const DEFAULT_MAX_ITER: usize = 1000;

/// Default convergence tolerance on the largest weight update
const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Lasso regression with an L1 penalty
///
/// Minimizes `0.5 ||yc - Xc w||^2 + lambda ||w||_1` per channel by cyclic
/// coordinate descent with soft thresholding. Channels are independent, so
/// they are fit in parallel. A sweep that still moves some weight by more
/// than the tolerance keeps iterating; exhausting the sweep limit without
/// converging is a fit failure.
#[derive(Clone, Debug)]
pub struct LassoRegression {
    /// Regularization strength
    pub lambda: f64,
    /// Maximum number of full coordinate sweeps
    pub max_iter: usize,
    /// Convergence threshold on the largest absolute weight update
    pub tolerance: f64,
}

impl LassoRegression {
    /// Create a lasso regressor with default iteration settings
    pub fn new(lambda: f64) -> Self {
        LassoRegression {
            lambda,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the sweep limit
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "lasso penalty {} must be finite and non-negative",
                self.lambda
            )));
        }
        if self.max_iter == 0 {
            return Err(EncodingError::InvalidConfiguration(
                "lasso needs at least one coordinate sweep".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "lasso tolerance {} must be finite and positive",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Coordinate descent for a single centered channel
    fn fit_channel(
        &self,
        samples: ArrayView2<'_, f64>,
        target: ArrayView1<'_, f64>,
        column_norms: ArrayView1<'_, f64>,
    ) -> Result<Array1<f64>> {
        let n_features = samples.ncols();
        let mut weights = Array1::<f64>::zeros(n_features);
        let mut residual = target.to_owned();

        for _ in 0..self.max_iter {
            let mut max_delta = 0.0f64;

            for j in 0..n_features {
                let norm = column_norms[j];
                if norm == 0.0 {
                    // Constant column after centering, nothing to fit.
                    continue;
                }

                let column = samples.column(j);
                let rho = column.dot(&residual) + norm * weights[j];
                let updated = soft_threshold(rho, self.lambda) / norm;
                let delta = updated - weights[j];

                if delta != 0.0 {
                    residual.scaled_add(-delta, &column);
                    weights[j] = updated;
                    max_delta = max_delta.max(delta.abs());
                }
            }

            if max_delta < self.tolerance {
                return Ok(weights);
            }
        }

        Err(EncodingError::FitFailure(format!(
            "coordinate descent did not converge within {} sweeps",
            self.max_iter
        )))
    }
}

impl Regressor for LassoRegression {
    fn fit(
        &self,
        samples: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<LinearModel> {
        validate_training_pair(samples, targets)?;
        self.validate()?;

        let x_means = column_means(samples);
        let y_means = column_means(targets);

        let mut centered_x = samples.to_owned();
        centered_x -= &x_means;
        let mut centered_y = targets.to_owned();
        centered_y -= &y_means;

        let column_norms: Array1<f64> = centered_x
            .axis_iter(Axis(1))
            .map(|column| column.dot(&column))
            .collect();

        let fitted: Vec<Array1<f64>> = (0..targets.ncols())
            .into_par_iter()
            .map(|c| {
                self.fit_channel(
                    centered_x.view(),
                    centered_y.column(c),
                    column_norms.view(),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let mut coefficients =
            Array2::<f64>::zeros((samples.ncols(), targets.ncols()));
        for (c, weights) in fitted.iter().enumerate() {
            coefficients.column_mut(c).assign(weights);
        }

        let intercepts = &y_means - &x_means.dot(&coefficients);
        LinearModel::new(coefficients, intercepts)
    }
}

/// Shrink toward zero, clipping the interval [-threshold, threshold]
fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}

//! Closed-form ridge regression for multi-channel targets

use ndarray::{Array2, ArrayView2};

use crate::{EncodingError, Result};

use super::{column_means, validate_training_pair, LinearModel, Regressor};

/// Ridge regression with a shared penalty across channels
///
/// Solves the centered normal equations `(Xc' Xc + lambda I) W = Xc' Yc`
/// once for all channels via a Cholesky factorization, then recovers the
/// intercepts from the column means. The penalty keeps the system positive
/// definite whenever `lambda > 0`; with `lambda = 0` a rank-deficient
/// stimulus matrix surfaces as a fit failure.
#[derive(Clone, Debug)]
pub struct RidgeRegression {
    /// Regularization strength
    pub lambda: f64,
}

impl RidgeRegression {
    /// Create a ridge regressor with the given penalty
    pub fn new(lambda: f64) -> Self {
        RidgeRegression { lambda }
    }
}

impl Regressor for RidgeRegression {
    fn fit(
        &self,
        samples: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<LinearModel> {
        validate_training_pair(samples, targets)?;

        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "ridge penalty {} must be finite and non-negative",
                self.lambda
            )));
        }

        let x_means = column_means(samples);
        let y_means = column_means(targets);

        let mut centered_x = samples.to_owned();
        centered_x -= &x_means;
        let mut centered_y = targets.to_owned();
        centered_y -= &y_means;

        let mut gram = centered_x.t().dot(&centered_x);
        for i in 0..gram.nrows() {
            gram[[i, i]] += self.lambda;
        }

        let cross = centered_x.t().dot(&centered_y);
        let coefficients = cholesky_solve(&gram, &cross)?;

        let intercepts = &y_means - &x_means.dot(&coefficients);
        LinearModel::new(coefficients, intercepts)
    }
}

/// Solve `A X = B` for symmetric positive definite `A`
///
/// Factors `A = L L'` and runs forward and back substitution for every
/// column of `B`. A non-positive or non-finite pivot means the system is
/// not positive definite, which the caller reports as a fit failure.
fn cholesky_solve(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>> {
    let n = a.nrows();
    let k = b.ncols();
    let mut factor = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for p in 0..j {
                sum += factor[[i, p]] * factor[[j, p]];
            }

            if i == j {
                let pivot = a[[i, i]] - sum;
                if pivot <= 0.0 || !pivot.is_finite() {
                    return Err(EncodingError::FitFailure(format!(
                        "normal equations are not positive definite (pivot {} at row {})",
                        pivot, i
                    )));
                }
                factor[[i, j]] = pivot.sqrt();
            } else {
                factor[[i, j]] = (a[[i, j]] - sum) / factor[[j, j]];
            }
        }
    }

    // Forward substitution: L Z = B
    let mut z = Array2::<f64>::zeros((n, k));
    for col in 0..k {
        for i in 0..n {
            let mut sum = b[[i, col]];
            for j in 0..i {
                sum -= factor[[i, j]] * z[[j, col]];
            }
            z[[i, col]] = sum / factor[[i, i]];
        }
    }

    // Back substitution: L' X = Z
    let mut x = Array2::<f64>::zeros((n, k));
    for col in 0..k {
        for i in (0..n).rev() {
            let mut sum = z[[i, col]];
            for j in (i + 1)..n {
                sum -= factor[[j, i]] * x[[j, col]];
            }
            x[[i, col]] = sum / factor[[i, i]];
        }
    }

    Ok(x)
}

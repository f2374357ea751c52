//! Regularized linear regression behind a swappable interface

mod lasso;
mod linear_model;
mod ridge;

pub use lasso::LassoRegression;
pub use linear_model::LinearModel;
pub use ridge::RidgeRegression;

use ndarray::{Array1, ArrayView2, Axis};

use crate::{EncodingError, Result};

/// Capability shared by the regression variants
///
/// A regressor fits one linear map per response channel from a training
/// partition. Implementations differ only in the penalty they apply, so
/// the evaluation driver and the field extractor accept any of them
/// through `&dyn Regressor`.
pub trait Regressor {
    /// Fit per-channel linear models on the given samples and targets
    fn fit(
        &self,
        samples: ArrayView2<'_, f64>,
        targets: ArrayView2<'_, f64>,
    ) -> Result<LinearModel>;
}

/// Check a training pair before solving
fn validate_training_pair(
    samples: ArrayView2<'_, f64>,
    targets: ArrayView2<'_, f64>,
) -> Result<()> {
    if samples.nrows() != targets.nrows() {
        return Err(EncodingError::InvalidConfiguration(format!(
            "sample rows ({}) and target rows ({}) must match",
            samples.nrows(),
            targets.nrows()
        )));
    }

    if samples.nrows() == 0 || samples.ncols() == 0 || targets.ncols() == 0 {
        return Err(EncodingError::InvalidConfiguration(
            "training data must be non-empty".to_string(),
        ));
    }

    if samples.iter().any(|v| !v.is_finite()) {
        return Err(EncodingError::FitFailure(
            "sample matrix contains non-finite values".to_string(),
        ));
    }

    if targets.iter().any(|v| !v.is_finite()) {
        return Err(EncodingError::FitFailure(
            "target matrix contains non-finite values".to_string(),
        ));
    }

    Ok(())
}

/// Column means of a matrix
fn column_means(matrix: ArrayView2<'_, f64>) -> Array1<f64> {
    matrix
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(matrix.ncols()))
}

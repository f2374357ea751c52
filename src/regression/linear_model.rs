//! Fitted linear encoding models

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{EncodingError, Result};

/// One fitted linear map per response channel
///
/// Stores a `[n_features, n_channels]` coefficient matrix and a per-channel
/// intercept. Both regression variants produce this type, so downstream
/// scoring and field extraction never care which penalty fit the model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearModel {
    /// Coefficients [n_features, n_channels]
    coefficients: Array2<f64>,
    /// Per-channel intercepts
    intercepts: Array1<f64>,
}

impl LinearModel {
    /// Assemble a model from fitted parameters
    pub fn new(coefficients: Array2<f64>, intercepts: Array1<f64>) -> Result<Self> {
        if coefficients.ncols() != intercepts.len() {
            return Err(EncodingError::DimensionMismatch(format!(
                "coefficient columns ({}) and intercepts ({}) must match",
                coefficients.ncols(),
                intercepts.len()
            )));
        }
        Ok(LinearModel {
            coefficients,
            intercepts,
        })
    }

    /// Get number of input features
    pub fn n_features(&self) -> usize {
        self.coefficients.nrows()
    }

    /// Get number of response channels
    pub fn n_channels(&self) -> usize {
        self.coefficients.ncols()
    }

    /// View of the coefficient matrix
    pub fn coefficients(&self) -> ArrayView2<'_, f64> {
        self.coefficients.view()
    }

    /// View of the intercept vector
    pub fn intercepts(&self) -> ArrayView1<'_, f64> {
        self.intercepts.view()
    }

    /// Coefficient column for one channel, if it exists
    pub fn channel_coefficients(&self, channel: usize) -> Option<ArrayView1<'_, f64>> {
        if channel < self.n_channels() {
            Some(self.coefficients.column(channel))
        } else {
            None
        }
    }

    /// Predict responses for new samples: X W + b
    pub fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if samples.ncols() != self.n_features() {
            return Err(EncodingError::DimensionMismatch(format!(
                "samples have {} features but the model was fit on {}",
                samples.ncols(),
                self.n_features()
            )));
        }

        let mut predictions = samples.dot(&self.coefficients);
        predictions += &self.intercepts;
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_predict_applies_weights_and_intercepts() {
        let coefficients = array![[2.0, 0.0], [0.0, 3.0]];
        let intercepts = array![1.0, -1.0];
        let model = LinearModel::new(coefficients, intercepts).unwrap();

        let samples = array![[1.0, 1.0], [0.5, 2.0]];
        let predictions = model.predict(samples.view()).unwrap();

        assert_eq!(predictions, array![[3.0, 2.0], [2.0, 5.0]]);
    }

    #[test]
    fn test_predict_rejects_feature_mismatch() {
        let model =
            LinearModel::new(array![[1.0], [1.0]], array![0.0]).unwrap();
        let samples = array![[1.0, 2.0, 3.0]];

        let result = model.predict(samples.view());
        assert!(matches!(result, Err(EncodingError::DimensionMismatch(_))));
    }

    #[test]
    fn test_mismatched_parts_rejected() {
        let result = LinearModel::new(array![[1.0, 2.0]], array![0.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_channel_coefficients_bounds() {
        let model =
            LinearModel::new(array![[1.0, 4.0], [2.0, 5.0]], array![0.0, 0.0])
                .unwrap();

        let column = model.channel_coefficients(1).unwrap();
        assert_eq!(column, array![4.0, 5.0].view());
        assert!(model.channel_coefficients(2).is_none());
    }
}

//! Spatial weight grids for receptive fields

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{EncodingError, Result};

/// Coefficient vector folded back into the stimulus's spatial layout
///
/// Feature `i` of a flattened stimulus maps to grid cell
/// `(i / cols, i % cols)`, so the grid is the row-major inverse of
/// [`crate::StimulusAligner::flatten_frames`]. Flattening a grid recovers
/// the original vector exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldGrid {
    weights: Array2<f64>,
}

impl FieldGrid {
    /// Reshape a flat coefficient vector into a rows x cols grid
    pub fn from_flat(
        coefficients: ArrayView1<'_, f64>,
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "grid shape {}x{} has no cells",
                rows, cols
            )));
        }

        if coefficients.len() != rows * cols {
            return Err(EncodingError::DimensionMismatch(format!(
                "coefficient vector of length {} cannot fill a {}x{} grid",
                coefficients.len(),
                rows,
                cols
            )));
        }

        let mut weights = Array2::zeros((rows, cols));
        for (i, &value) in coefficients.iter().enumerate() {
            weights[[i / cols, i % cols]] = value;
        }

        Ok(FieldGrid { weights })
    }

    /// Wrap an existing weight matrix
    pub fn from_weights(weights: Array2<f64>) -> Result<Self> {
        if weights.nrows() == 0 || weights.ncols() == 0 {
            return Err(EncodingError::InvalidConfiguration(
                "grid must have at least one row and one column".to_string(),
            ));
        }
        Ok(FieldGrid { weights })
    }

    /// Get number of grid rows
    pub fn rows(&self) -> usize {
        self.weights.nrows()
    }

    /// Get number of grid columns
    pub fn cols(&self) -> usize {
        self.weights.ncols()
    }

    /// View of the weight matrix
    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    /// Flatten back to a row-major coefficient vector
    pub fn flatten(&self) -> Array1<f64> {
        Array1::from_iter(self.weights.iter().copied())
    }

    /// Location and value of the largest-magnitude weight
    pub fn peak(&self) -> (usize, usize, f64) {
        let mut best = (0, 0, self.weights[[0, 0]]);
        for ((r, c), &value) in self.weights.indexed_iter() {
            if value.abs() > best.2.abs() {
                best = (r, c, value);
            }
        }
        best
    }
}

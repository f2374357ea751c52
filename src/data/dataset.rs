//! Paired stimulus/response matrices for encoding analyses

use ndarray::{Array2, ArrayView2, Axis};

use crate::{EncodingError, Result};

/// Aligned sample and response matrices with matching row counts
///
/// Rows are observations; stimulus columns are flattened pixel features and
/// response columns are voxel channels. Both matrices are built once and
/// consumed read-only by fitting and scoring.
#[derive(Clone, Debug)]
pub struct EncodingDataset {
    /// Stimulus samples [n_samples, n_features]
    stimuli: Array2<f64>,
    /// Voxel responses [n_samples, n_channels]
    responses: Array2<f64>,
}

impl EncodingDataset {
    /// Create a dataset, checking that row counts match
    pub fn new(stimuli: Array2<f64>, responses: Array2<f64>) -> Result<Self> {
        if stimuli.nrows() != responses.nrows() {
            return Err(EncodingError::InvalidConfiguration(format!(
                "stimulus rows ({}) and response rows ({}) must match",
                stimuli.nrows(),
                responses.nrows()
            )));
        }

        if stimuli.nrows() == 0 {
            return Err(EncodingError::InvalidConfiguration(
                "dataset must contain at least one sample".to_string(),
            ));
        }

        if stimuli.ncols() == 0 || responses.ncols() == 0 {
            return Err(EncodingError::InvalidConfiguration(
                "dataset must have at least one feature and one channel".to_string(),
            ));
        }

        Ok(EncodingDataset { stimuli, responses })
    }

    /// Get number of observations
    pub fn n_samples(&self) -> usize {
        self.stimuli.nrows()
    }

    /// Get number of stimulus features per observation
    pub fn n_features(&self) -> usize {
        self.stimuli.ncols()
    }

    /// Get number of response channels (voxels)
    pub fn n_channels(&self) -> usize {
        self.responses.ncols()
    }

    /// View of the stimulus matrix
    pub fn stimuli(&self) -> ArrayView2<'_, f64> {
        self.stimuli.view()
    }

    /// View of the response matrix
    pub fn responses(&self) -> ArrayView2<'_, f64> {
        self.responses.view()
    }

    /// Copy out the stimulus and response rows at the given indices
    ///
    /// Used by the cross-validation driver to materialize train and test
    /// partitions. Indices outside `0..n_samples` panic, as they would for
    /// any ndarray selection; fold construction never produces them.
    pub fn rows(&self, indices: &[usize]) -> (Array2<f64>, Array2<f64>) {
        (
            self.stimuli.select(Axis(0), indices),
            self.responses.select(Axis(0), indices),
        )
    }

    /// Copy out a subset of response channels as a new target matrix
    pub fn channel_subset(&self, channels: &[usize]) -> Result<Array2<f64>> {
        if channels.is_empty() {
            return Err(EncodingError::InvalidConfiguration(
                "channel subset is empty".to_string(),
            ));
        }

        for &channel in channels {
            if channel >= self.n_channels() {
                return Err(EncodingError::InvalidConfiguration(format!(
                    "channel {} is out of range (dataset has {} channels)",
                    channel,
                    self.n_channels()
                )));
            }
        }

        Ok(self.responses.select(Axis(1), channels))
    }
}

//! Alignment of stimulus frames with lagged voxel responses

use ndarray::{s, Array2, ArrayView3};

use crate::{EncodingError, Result};

use super::EncodingDataset;

/// Pairs stimulus frames with the responses they evoked
///
/// Hemodynamic responses lag the stimulus by a fixed number of acquisition
/// steps. With an onset delay of `d`, the response recorded at step `t + d`
/// is attributed to the stimulus shown at step `t`, so the first `d` response
/// rows and the last `d` stimulus rows carry no usable pairing and are
/// dropped.
#[derive(Clone, Debug)]
pub struct StimulusAligner {
    /// Number of acquisition steps the response lags the stimulus
    onset_delay: usize,
}

impl StimulusAligner {
    /// Create an aligner with no onset delay
    pub fn new() -> Self {
        StimulusAligner { onset_delay: 0 }
    }

    /// Set the onset delay in acquisition steps
    pub fn with_onset_delay(mut self, delay: usize) -> Self {
        self.onset_delay = delay;
        self
    }

    /// Get the configured onset delay
    pub fn onset_delay(&self) -> usize {
        self.onset_delay
    }

    /// Flatten [n, height, width] stimulus frames into [n, height * width]
    ///
    /// Pixels are laid out row-major, matching the layout that
    /// [`crate::fields::FieldGrid`] reverses when coefficients are folded
    /// back into a grid.
    pub fn flatten_frames(&self, frames: ArrayView3<'_, f64>) -> Array2<f64> {
        let (n, height, width) = frames.dim();
        let mut flat = Array2::zeros((n, height * width));

        for (i, frame) in frames.outer_iter().enumerate() {
            for (j, &value) in frame.iter().enumerate() {
                flat[[i, j]] = value;
            }
        }

        flat
    }

    /// Shift out the onset delay and build an aligned dataset
    ///
    /// Drops the last `delay` stimulus rows and the first `delay` response
    /// rows. The trimmed matrices must end up with the same number of rows;
    /// recordings of unequal length should be truncated by the caller first.
    pub fn align(
        &self,
        stimuli: Array2<f64>,
        responses: Array2<f64>,
    ) -> Result<EncodingDataset> {
        let delay = self.onset_delay;

        if delay >= stimuli.nrows() || delay >= responses.nrows() {
            return Err(EncodingError::InvalidConfiguration(format!(
                "onset delay {} leaves no samples ({} stimulus rows, {} response rows)",
                delay,
                stimuli.nrows(),
                responses.nrows()
            )));
        }

        let kept_stimuli = stimuli.nrows() - delay;
        let trimmed_stimuli = stimuli.slice(s![..kept_stimuli, ..]).to_owned();
        let trimmed_responses = responses.slice(s![delay.., ..]).to_owned();

        EncodingDataset::new(trimmed_stimuli, trimmed_responses)
    }
}

impl Default for StimulusAligner {
    fn default() -> Self {
        Self::new()
    }
}

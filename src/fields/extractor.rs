//! Receptive-field estimation from fitted coefficients

use serde::{Deserialize, Serialize};

use crate::data::EncodingDataset;
use crate::regression::Regressor;
use crate::{EncodingError, Result};

use super::FieldGrid;

/// Estimated spatial selectivity of one channel
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceptiveField {
    /// Channel index in the source dataset
    pub channel: usize,
    /// Fitted weight grid in stimulus layout
    pub grid: FieldGrid,
}

/// Reshapes fitted coefficients into stimulus-space weight grids
///
/// Fits the requested channels once over the full dataset and folds each
/// channel's coefficient vector back into the stimulus grid, so a field
/// cell shows how strongly its pixel drives the channel.
#[derive(Clone, Debug)]
pub struct ReceptiveFieldExtractor {
    rows: usize,
    cols: usize,
}

impl ReceptiveFieldExtractor {
    /// Create an extractor for the given stimulus grid shape
    pub fn new(rows: usize, cols: usize) -> Self {
        ReceptiveFieldExtractor { rows, cols }
    }

    /// Get the stimulus grid shape (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Fit the requested channels and extract their weight grids
    pub fn extract(
        &self,
        dataset: &EncodingDataset,
        regressor: &dyn Regressor,
        channels: &[usize],
    ) -> Result<Vec<ReceptiveField>> {
        if dataset.n_features() != self.rows * self.cols {
            return Err(EncodingError::DimensionMismatch(format!(
                "dataset has {} features but the grid shape {}x{} needs {}",
                dataset.n_features(),
                self.rows,
                self.cols,
                self.rows * self.cols
            )));
        }

        let targets = dataset.channel_subset(channels)?;
        let model = regressor.fit(dataset.stimuli(), targets.view())?;

        channels
            .iter()
            .enumerate()
            .map(|(column, &channel)| {
                let grid = FieldGrid::from_flat(
                    model.coefficients().column(column),
                    self.rows,
                    self.cols,
                )?;
                Ok(ReceptiveField { channel, grid })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_synthetic, SyntheticConfig};
    use crate::regression::RidgeRegression;

    fn planted(config: &SyntheticConfig) -> (EncodingDataset, Vec<FieldGrid>) {
        generate_synthetic(config).unwrap()
    }

    #[test]
    fn test_extract_recovers_planted_peaks() {
        let config = SyntheticConfig {
            samples: 400,
            rows: 6,
            cols: 6,
            channels: 3,
            noise: 0.01,
            ..SyntheticConfig::default()
        };
        let (dataset, truth) = planted(&config);
        let ridge = RidgeRegression::new(0.1);

        let extractor = ReceptiveFieldExtractor::new(6, 6);
        let fields = extractor
            .extract(&dataset, &ridge, &[0, 1, 2])
            .unwrap();

        assert_eq!(fields.len(), 3);
        for field in &fields {
            let (r, c, _) = field.grid.peak();
            let (true_r, true_c, _) = truth[field.channel].peak();
            let row_err = (r as isize - true_r as isize).abs();
            let col_err = (c as isize - true_c as isize).abs();
            assert!(
                row_err <= 1 && col_err <= 1,
                "channel {} peak at ({}, {}), planted at ({}, {})",
                field.channel,
                r,
                c,
                true_r,
                true_c
            );
        }
    }

    #[test]
    fn test_noiseless_fit_recovers_planted_weights() {
        let config = SyntheticConfig {
            samples: 400,
            rows: 6,
            cols: 6,
            channels: 2,
            noise: 0.0,
            ..SyntheticConfig::default()
        };
        let (dataset, truth) = planted(&config);
        let ridge = RidgeRegression::new(1e-6);

        let fields = ReceptiveFieldExtractor::new(6, 6)
            .extract(&dataset, &ridge, &[0, 1])
            .unwrap();

        for field in &fields {
            let fitted = field.grid.flatten();
            let expected = truth[field.channel].flatten();
            for (f, e) in fitted.iter().zip(expected.iter()) {
                assert!((f - e).abs() < 1e-2, "weight {} vs planted {}", f, e);
            }
        }
    }

    #[test]
    fn test_channel_labels_follow_request_order() {
        let config = SyntheticConfig {
            samples: 80,
            rows: 3,
            cols: 3,
            channels: 4,
            ..SyntheticConfig::default()
        };
        let (dataset, _) = planted(&config);
        let ridge = RidgeRegression::new(1.0);

        let fields = ReceptiveFieldExtractor::new(3, 3)
            .extract(&dataset, &ridge, &[3, 1])
            .unwrap();

        assert_eq!(fields[0].channel, 3);
        assert_eq!(fields[1].channel, 1);
        assert_eq!(fields[0].grid.rows(), 3);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let config = SyntheticConfig {
            samples: 40,
            rows: 4,
            cols: 4,
            channels: 2,
            ..SyntheticConfig::default()
        };
        let (dataset, _) = planted(&config);
        let ridge = RidgeRegression::new(1.0);

        let result = ReceptiveFieldExtractor::new(5, 5).extract(&dataset, &ridge, &[0]);
        assert!(matches!(result, Err(EncodingError::DimensionMismatch(_))));
    }

    #[test]
    fn test_unknown_channel_rejected() {
        let config = SyntheticConfig {
            samples: 40,
            rows: 4,
            cols: 4,
            channels: 2,
            ..SyntheticConfig::default()
        };
        let (dataset, _) = planted(&config);
        let ridge = RidgeRegression::new(1.0);

        let result = ReceptiveFieldExtractor::new(4, 4).extract(&dataset, &ridge, &[5]);
        assert!(result.is_err());
    }
}

//! Analysis configuration for encoding workflows

use serde::{Deserialize, Serialize};

use crate::evaluation::KFold;
use crate::regression::{LassoRegression, Regressor, RidgeRegression};
use crate::{EncodingError, Result};

/// Regularization variant applied during fitting
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Penalty {
    /// Dense L2 penalty solved in closed form
    Ridge {
        /// Regularization strength
        lambda: f64,
    },
    /// Sparse L1 penalty solved by coordinate descent
    Lasso {
        /// Regularization strength
        lambda: f64,
        /// Maximum number of coordinate sweeps
        max_iter: usize,
        /// Convergence threshold on the largest weight update
        tolerance: f64,
    },
}

impl Penalty {
    /// Get the regularization strength
    pub fn lambda(&self) -> f64 {
        match self {
            Penalty::Ridge { lambda } => *lambda,
            Penalty::Lasso { lambda, .. } => *lambda,
        }
    }
}

/// Configuration for a cross-validated encoding analysis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// Penalty variant and strength
    pub penalty: Penalty,
    /// Number of cross-validation folds
    pub folds: usize,
    /// Seed for fold shuffling; None keeps contiguous folds
    pub shuffle_seed: Option<u64>,
    /// Stimulus grid shape (rows, cols) for field extraction
    pub field_shape: (usize, usize),
    /// Channels to extract receptive fields for
    pub field_channels: Vec<usize>,
}

impl EncodingConfig {
    /// Configuration for a dense ridge analysis
    pub fn for_ridge_encoding(lambda: f64) -> Self {
        EncodingConfig {
            penalty: Penalty::Ridge { lambda },
            folds: 10,
            shuffle_seed: None,
            field_shape: (10, 10),
            field_channels: Vec::new(),
        }
    }

    /// Configuration for a sparse lasso analysis
    pub fn for_sparse_encoding(lambda: f64) -> Self {
        EncodingConfig {
            penalty: Penalty::Lasso {
                lambda,
                max_iter: 1000,
                tolerance: 1e-6,
            },
            folds: 10,
            shuffle_seed: None,
            field_shape: (10, 10),
            field_channels: Vec::new(),
        }
    }

    /// Set the fold count
    pub fn with_folds(mut self, folds: usize) -> Self {
        self.folds = folds;
        self
    }

    /// Shuffle folds with the given seed
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    /// Set the stimulus grid shape
    pub fn with_field_shape(mut self, rows: usize, cols: usize) -> Self {
        self.field_shape = (rows, cols);
        self
    }

    /// Set the channels to extract fields for
    pub fn with_field_channels(mut self, channels: Vec<usize>) -> Self {
        self.field_channels = channels;
        self
    }

    /// Check parameters before running an analysis
    ///
    /// The fold count is only checked against its lower bound here; the
    /// upper bound depends on the dataset and is enforced at split time.
    pub fn validate(&self) -> Result<()> {
        if self.folds < 2 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "cross-validation needs at least 2 folds, got {}",
                self.folds
            )));
        }

        let lambda = self.penalty.lambda();
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "penalty strength {} must be finite and positive",
                lambda
            )));
        }

        if let Penalty::Lasso {
            max_iter,
            tolerance,
            ..
        } = self.penalty
        {
            if max_iter == 0 {
                return Err(EncodingError::InvalidConfiguration(
                    "lasso needs at least one coordinate sweep".to_string(),
                ));
            }
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(EncodingError::InvalidConfiguration(format!(
                    "lasso tolerance {} must be finite and positive",
                    tolerance
                )));
            }
        }

        let (rows, cols) = self.field_shape;
        if rows == 0 || cols == 0 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "field shape {}x{} has no cells",
                rows, cols
            )));
        }

        Ok(())
    }

    /// Build the regressor this configuration describes
    pub fn regressor(&self) -> Box<dyn Regressor> {
        match self.penalty {
            Penalty::Ridge { lambda } => Box::new(RidgeRegression::new(lambda)),
            Penalty::Lasso {
                lambda,
                max_iter,
                tolerance,
            } => Box::new(
                LassoRegression::new(lambda)
                    .with_max_iter(max_iter)
                    .with_tolerance(tolerance),
            ),
        }
    }

    /// Build the fold splitter this configuration describes
    pub fn kfold(&self) -> KFold {
        let splitter = KFold::new(self.folds);
        match self.shuffle_seed {
            Some(seed) => splitter.with_shuffle(seed),
            None => splitter,
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self::for_ridge_encoding(10.0)
    }
}

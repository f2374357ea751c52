//! # Voxel-ML: cross-validated voxel-wise encoding models
//!
//! This library fits regularized linear encoding models that predict
//! per-voxel brain responses from visual stimuli, scores them per voxel
//! with K-fold cross-validation, and reshapes the learned coefficients
//! into receptive-field maps over the stimulus grid.
//!
//! ## Features
//!
//! - **Data alignment**: onset-delay trimming and stimulus-frame flattening
//! - **Cross-validation**: balanced K-fold index partitions, optionally shuffled
//! - **Regression**: ridge (closed form) and lasso (coordinate descent) behind one `Regressor` interface
//! - **Scoring**: per-voxel R² averaged across folds, clamped only for reporting
//! - **Receptive fields**: per-voxel coefficient grids in the stimulus layout

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Dataset construction, alignment, and synthetic data
pub mod data;

/// Regression models behind the `Regressor` interface
pub mod regression;

/// Fold partitions, scoring, and the cross-validation driver
pub mod evaluation;

/// Receptive-field grids and extraction
pub mod fields;

/// Analysis configuration
pub mod config;

/// Utility functions and helpers
pub mod utils;

// Re-export commonly used types
pub use config::{EncodingConfig, Penalty};
pub use data::{EncodingDataset, StimulusAligner};
pub use evaluation::{cross_validate, ChannelScores, KFold};
pub use fields::{FieldGrid, ReceptiveField, ReceptiveFieldExtractor};
pub use regression::{LassoRegression, LinearModel, Regressor, RidgeRegression};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Invalid analysis configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Numerical failure while fitting a model
    #[error("Fit failure: {0}")]
    FitFailure(String),

    /// Array shape does not match the expected layout
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, EncodingError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        config::{EncodingConfig, Penalty},
        data::{EncodingDataset, StimulusAligner},
        evaluation::{cross_validate, select_lambda, ChannelScores, KFold},
        fields::{FieldGrid, ReceptiveField, ReceptiveFieldExtractor},
        regression::{LassoRegression, LinearModel, Regressor, RidgeRegression},
        EncodingError, Result,
    };
}

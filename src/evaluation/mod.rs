//! Cross-validated evaluation of encoding fits

mod cross_validation;
mod folds;
mod scores;

pub use cross_validation::{cross_validate, select_lambda, LambdaSelection};
pub use folds::{Fold, KFold};
pub use scores::{r_squared, ChannelScores};

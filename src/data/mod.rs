//! Stimulus and response data handling

mod aligner;
mod dataset;
mod synthetic;

pub use aligner::StimulusAligner;
pub use dataset::EncodingDataset;
pub use synthetic::{generate_synthetic, SyntheticConfig};

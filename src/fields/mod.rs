//! Receptive field grids and extraction

mod extractor;
mod grid;

pub use extractor::{ReceptiveField, ReceptiveFieldExtractor};
pub use grid::FieldGrid;

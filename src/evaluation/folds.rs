//! Balanced K-fold index partitions

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{EncodingError, Result};

/// Indices for one train/test split
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fold {
    /// Sample indices used for fitting
    pub train: Vec<usize>,
    /// Held-out sample indices used for scoring
    pub test: Vec<usize>,
}

/// Partitions sample indices into K balanced folds
///
/// Test blocks are contiguous by default, which respects the temporal
/// ordering of a recording session. When `n` does not divide evenly, the
/// first `n mod k` folds receive one extra test sample, so fold sizes
/// never differ by more than one. An optional seeded shuffle permutes the
/// indices before slicing.
#[derive(Clone, Debug)]
pub struct KFold {
    k: usize,
    seed: Option<u64>,
}

impl KFold {
    /// Create a splitter with contiguous test blocks
    pub fn new(k: usize) -> Self {
        KFold { k, seed: None }
    }

    /// Shuffle indices with the given seed before slicing folds
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Get the configured fold count
    pub fn k(&self) -> usize {
        self.k
    }

    /// Partition `0..n_samples` into folds
    ///
    /// Every index lands in exactly one test set, and each fold's training
    /// set is the complement of its test set.
    pub fn split(&self, n_samples: usize) -> Result<Vec<Fold>> {
        if self.k < 2 {
            return Err(EncodingError::InvalidConfiguration(format!(
                "cross-validation needs at least 2 folds, got {}",
                self.k
            )));
        }

        if self.k > n_samples {
            return Err(EncodingError::InvalidConfiguration(format!(
                "cannot split {} samples into {} folds",
                n_samples, self.k
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if let Some(seed) = self.seed {
            let mut rng = StdRng::seed_from_u64(seed);
            indices.shuffle(&mut rng);
        }

        let base = n_samples / self.k;
        let extra = n_samples % self.k;

        let mut folds = Vec::with_capacity(self.k);
        let mut cursor = 0;
        for fold_index in 0..self.k {
            let size = base + usize::from(fold_index < extra);
            let test = indices[cursor..cursor + size].to_vec();
            let train = indices[..cursor]
                .iter()
                .chain(indices[cursor + size..].iter())
                .copied()
                .collect();
            folds.push(Fold { train, test });
            cursor += size;
        }

        Ok(folds)
    }
}

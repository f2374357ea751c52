//! Cross-validated evaluation of encoding models

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::EncodingDataset;
use crate::regression::Regressor;
use crate::{EncodingError, Result};

use super::folds::KFold;
use super::scores::{r_squared, ChannelScores};

/// Fit and score one model per fold, aggregating per-channel R^2
///
/// Each fold fits on its training rows and scores on its held-out rows, so
/// every score reflects prediction of unseen samples. A fit failure on any
/// fold aborts the run; partial score matrices are never returned.
pub fn cross_validate(
    dataset: &EncodingDataset,
    regressor: &dyn Regressor,
    folds: &KFold,
) -> Result<ChannelScores> {
    let plan = folds.split(dataset.n_samples())?;
    let mut per_fold = Array2::zeros((plan.len(), dataset.n_channels()));

    for (f, fold) in plan.iter().enumerate() {
        let (train_x, train_y) = dataset.rows(&fold.train);
        let (test_x, test_y) = dataset.rows(&fold.test);

        let model = regressor.fit(train_x.view(), train_y.view())?;
        let predicted = model.predict(test_x.view())?;

        for c in 0..dataset.n_channels() {
            per_fold[[f, c]] = r_squared(predicted.column(c), test_y.column(c));
        }
    }

    Ok(ChannelScores::from_fold_scores(per_fold))
}

/// Outcome of a regularization strength sweep
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LambdaSelection {
    /// Candidate penalty that scored best
    pub best_lambda: f64,
    /// Mean raw score across channels for each candidate, in input order
    pub candidate_scores: Vec<f64>,
}

/// Cross-validate each candidate penalty and keep the best
///
/// Candidates are compared on the raw mean score across channels; clamping
/// stays a reporting concern and never influences selection. The builder
/// closure turns a candidate strength into a regressor, so the sweep works
/// for either penalty.
pub fn select_lambda<B>(
    dataset: &EncodingDataset,
    folds: &KFold,
    candidates: &[f64],
    build: B,
) -> Result<LambdaSelection>
where
    B: Fn(f64) -> Box<dyn Regressor>,
{
    if candidates.is_empty() {
        return Err(EncodingError::InvalidConfiguration(
            "lambda sweep needs at least one candidate".to_string(),
        ));
    }

    let mut candidate_scores = Vec::with_capacity(candidates.len());
    let mut best: Option<(f64, f64)> = None;

    for &lambda in candidates {
        let regressor = build(lambda);
        let scores = cross_validate(dataset, regressor.as_ref(), folds)?;
        let mean = scores.raw().mean().unwrap_or(f64::NEG_INFINITY);
        candidate_scores.push(mean);

        let improved = match best {
            Some((_, best_mean)) => mean > best_mean,
            None => true,
        };
        if improved {
            best = Some((lambda, mean));
        }
    }

    // Candidates is non-empty, so a best entry always exists.
    let (best_lambda, _) = best.ok_or_else(|| {
        EncodingError::FitFailure("no candidate produced a score".to_string())
    })?;

    Ok(LambdaSelection {
        best_lambda,
        candidate_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_synthetic, SyntheticConfig};
    use crate::regression::{LassoRegression, RidgeRegression};

    fn small_dataset() -> EncodingDataset {
        let config = SyntheticConfig {
            samples: 60,
            rows: 4,
            cols: 4,
            channels: 3,
            noise: 0.02,
            ..SyntheticConfig::default()
        };
        let (dataset, _) = generate_synthetic(&config).unwrap();
        dataset
    }

    #[test]
    fn test_cross_validate_scores_every_channel() {
        let dataset = small_dataset();
        let ridge = RidgeRegression::new(1.0);

        let scores = cross_validate(&dataset, &ridge, &KFold::new(5)).unwrap();
        assert_eq!(scores.n_folds(), 5);
        assert_eq!(scores.n_channels(), 3);
    }

    #[test]
    fn test_planted_signal_scores_high() {
        let dataset = small_dataset();
        let ridge = RidgeRegression::new(0.1);

        let scores = cross_validate(&dataset, &ridge, &KFold::new(5)).unwrap();
        for &score in scores.raw() {
            assert!(score > 0.8, "expected strong recovery, got {}", score);
        }
    }

    #[test]
    fn test_run_is_reproducible() {
        let dataset = small_dataset();
        let ridge = RidgeRegression::new(1.0);
        let folds = KFold::new(4).with_shuffle(11);

        let a = cross_validate(&dataset, &ridge, &folds).unwrap();
        let b = cross_validate(&dataset, &ridge, &folds).unwrap();
        assert_eq!(a.per_fold(), b.per_fold());
    }

    #[test]
    fn test_fold_failure_aborts_run() {
        let dataset = small_dataset();
        // A sweep limit of one cannot converge on this data.
        let lasso = LassoRegression::new(0.001)
            .with_max_iter(1)
            .with_tolerance(1e-12);

        let result = cross_validate(&dataset, &lasso, &KFold::new(4));
        assert!(matches!(result, Err(EncodingError::FitFailure(_))));
    }

    #[test]
    fn test_invalid_fold_count_propagates() {
        let dataset = small_dataset();
        let ridge = RidgeRegression::new(1.0);

        let result = cross_validate(&dataset, &ridge, &KFold::new(61));
        assert!(matches!(
            result,
            Err(EncodingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_select_lambda_prefers_better_fit() {
        let dataset = small_dataset();
        let candidates = [0.1, 1.0, 1e6];

        let selection = select_lambda(&dataset, &KFold::new(4), &candidates, |l| {
            Box::new(RidgeRegression::new(l))
        })
        .unwrap();

        assert_eq!(selection.candidate_scores.len(), 3);
        // An absurdly strong penalty flattens the model and cannot win.
        assert!(selection.best_lambda < 1e6);
    }

    #[test]
    fn test_select_lambda_rejects_empty_grid() {
        let dataset = small_dataset();
        let result = select_lambda(&dataset, &KFold::new(4), &[], |l| {
            Box::new(RidgeRegression::new(l))
        });
        assert!(matches!(
            result,
            Err(EncodingError::InvalidConfiguration(_))
        ));
    }
}

//! Per-channel goodness-of-fit scores

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Coefficient of determination of predictions against observations
///
/// `R^2 = 1 - SS_res / SS_tot`, with `SS_tot` taken about the mean of the
/// observed values. A constant predictor sitting at that mean scores
/// exactly zero, and a zero-variance observation vector scores zero by
/// convention instead of dividing by zero. Values below zero are kept;
/// clamping is a presentation choice made by [`ChannelScores::clamped`].
pub fn r_squared<F: Float>(predicted: ArrayView1<'_, F>, observed: ArrayView1<'_, F>) -> F {
    let n = observed.len();
    if n == 0 || predicted.len() != n {
        return F::zero();
    }

    let count = F::from(n).unwrap_or_else(F::one);
    let mean = observed.iter().fold(F::zero(), |acc, &v| acc + v) / count;

    let mut ss_res = F::zero();
    let mut ss_tot = F::zero();
    for (&p, &o) in predicted.iter().zip(observed.iter()) {
        ss_res = ss_res + (o - p) * (o - p);
        ss_tot = ss_tot + (o - mean) * (o - mean);
    }

    if ss_tot == F::zero() {
        return F::zero();
    }

    F::one() - ss_res / ss_tot
}

/// Cross-validated R^2 scores for every response channel
///
/// Keeps the raw per-fold matrix so negative scores stay visible for
/// diagnostics; the clamped view floors them at zero for reporting.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChannelScores {
    /// Raw scores [n_folds, n_channels]
    per_fold: Array2<f64>,
    /// Raw mean across folds per channel
    mean: Array1<f64>,
}

impl ChannelScores {
    /// Aggregate raw per-fold scores
    pub(crate) fn from_fold_scores(per_fold: Array2<f64>) -> Self {
        let mean = per_fold
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(per_fold.ncols()));
        ChannelScores { per_fold, mean }
    }

    /// Get number of folds scored
    pub fn n_folds(&self) -> usize {
        self.per_fold.nrows()
    }

    /// Get number of channels scored
    pub fn n_channels(&self) -> usize {
        self.per_fold.ncols()
    }

    /// Raw per-fold score matrix [n_folds, n_channels]
    pub fn per_fold(&self) -> ArrayView2<'_, f64> {
        self.per_fold.view()
    }

    /// Raw mean score per channel, negatives included
    pub fn raw(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    /// Mean score per channel with negatives floored at zero
    pub fn clamped(&self) -> Array1<f64> {
        self.mean.mapv(|v| v.max(0.0))
    }

    /// Channel with the highest raw mean score
    pub fn best_channel(&self) -> Option<(usize, f64)> {
        self.mean
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(index, &score)| (index, score))
    }

    /// Count channels whose raw mean score exceeds a threshold
    pub fn channels_above(&self, threshold: f64) -> usize {
        self.mean.iter().filter(|&&v| v > threshold).count()
    }

    /// Generate a human-readable report
    pub fn summary(&self) -> String {
        let clamped = self.clamped();
        let grand_mean = clamped.mean().unwrap_or(0.0);
        let (best_index, best_score) = self.best_channel().unwrap_or((0, 0.0));

        format!(
            "Channels scored: {}\nFolds: {}\nMean R2 (clamped): {:.4}\nBest channel: {} (R2 = {:.4})\nChannels above 0.1: {}",
            self.n_channels(),
            self.n_folds(),
            grand_mean,
            best_index,
            best_score,
            self.channels_above(0.1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_predictions_score_one() {
        let observed = array![1.0, 2.0, 3.0, 4.0];
        let score = r_squared(observed.view(), observed.view());
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_predictor_scores_zero() {
        let observed = array![1.0, 2.0, 3.0, 4.0];
        let predicted = array![2.5, 2.5, 2.5, 2.5];
        let score = r_squared(predicted.view(), observed.view());
        assert!(score.abs() < 1e-12);
    }

    #[test]
    fn test_bad_predictions_go_negative() {
        let observed = array![1.0, 2.0, 3.0, 4.0];
        let predicted = array![4.0, 3.0, 2.0, 1.0];
        let score = r_squared(predicted.view(), observed.view());
        assert!(score < 0.0);
    }

    #[test]
    fn test_zero_variance_scores_zero() {
        let observed = array![2.0, 2.0, 2.0];
        let predicted = array![2.0, 2.0, 2.0];
        assert_eq!(r_squared(predicted.view(), observed.view()), 0.0);
    }

    #[test]
    fn test_generic_over_float_width() {
        let observed = array![1.0f32, 2.0, 3.0];
        let predicted = array![1.1f32, 1.9, 3.2];
        let score = r_squared(predicted.view(), observed.view());
        assert!(score > 0.9 && score < 1.0);
    }

    #[test]
    fn test_scores_keep_raw_and_clamp_on_demand() {
        let per_fold = array![[0.75, -0.5], [0.25, -0.25]];
        let scores = ChannelScores::from_fold_scores(per_fold);

        assert_eq!(scores.raw(), array![0.5, -0.375].view());
        assert_eq!(scores.clamped(), array![0.5, 0.0]);
        assert_eq!(scores.n_folds(), 2);
        assert_eq!(scores.n_channels(), 2);
    }

    #[test]
    fn test_best_channel_and_threshold_count() {
        let per_fold = array![[0.125, 0.5, 0.25], [0.375, 0.75, 0.125]];
        let scores = ChannelScores::from_fold_scores(per_fold);

        assert_eq!(scores.best_channel(), Some((1, 0.625)));
        assert_eq!(scores.channels_above(0.2), 2);
    }

    #[test]
    fn test_summary_mentions_shape() {
        let per_fold = array![[0.5, 0.2]];
        let summary = ChannelScores::from_fold_scores(per_fold).summary();
        assert!(summary.contains("Channels scored: 2"));
        assert!(summary.contains("Folds: 1"));
    }
}

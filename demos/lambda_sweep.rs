use voxel_ml::data::{generate_synthetic, SyntheticConfig};
use voxel_ml::evaluation::{select_lambda, KFold};
use voxel_ml::regression::{Regressor, RidgeRegression};

fn main() {
    // Noisier data makes the penalty choice matter
    let synth = SyntheticConfig {
        samples: 150,
        rows: 6,
        cols: 6,
        channels: 4,
        noise: 0.5,
        ..SyntheticConfig::default()
    };
    let (dataset, _) = generate_synthetic(&synth).unwrap();

    let candidates = [0.01, 0.1, 1.0, 10.0, 100.0, 1000.0];
    let folds = KFold::new(5).with_shuffle(7);

    let selection = select_lambda(&dataset, &folds, &candidates, |lambda| {
        Box::new(RidgeRegression::new(lambda)) as Box<dyn Regressor>
    })
    .unwrap();

    println!("Ridge penalty sweep ({} folds):", folds.k());
    for (lambda, score) in candidates.iter().zip(selection.candidate_scores.iter()) {
        let marker = if *lambda == selection.best_lambda {
            "  <- best"
        } else {
            ""
        };
        println!("  lambda {:>8.2}: mean R2 {:.4}{}", lambda, score, marker);
    }
}

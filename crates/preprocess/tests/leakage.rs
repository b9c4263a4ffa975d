//! Training statistics must not depend on anything in the test partition.

use approx::assert_relative_eq;
use ndarray::Array2;
use tribar_preprocess::Preprocessor;
use tribar_types::{FeatureTable, PreprocessConfig};

fn features(values: Vec<f64>) -> FeatureTable {
    let rows = values.len();
    let matrix = Array2::from_shape_vec((rows, 1), values).unwrap();
    FeatureTable::new(vec!["close".into()], matrix, 0).unwrap()
}

fn nil_labels(rows: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, 3), |(_, c)| if c == 2 { 1.0 } else { 0.0 })
}

// 20 rows, W = 3: 17 windows, the first 10 train (rows 0..12), the rest test
fn prices(shock: f64) -> Vec<f64> {
    let mut values: Vec<f64> = (0..20).map(|i| 100.0 + f64::from(i % 4)).collect();
    values[15] = shock;
    values
}

#[test]
fn extreme_test_value_does_not_move_training_scaling() {
    let config = PreprocessConfig {
        window_size: 3,
        test_split: 0.4,
        ..PreprocessConfig::default()
    };
    let preprocessor = Preprocessor::new(config).unwrap();

    let calm = preprocessor
        .prepare(features(prices(103.0)), nil_labels(20).view())
        .unwrap();
    let shocked = preprocessor
        .prepare(features(prices(1.0e6)), nil_labels(20).view())
        .unwrap();

    assert_eq!(calm.x_train().dim(), shocked.x_train().dim());
    for (a, b) in calm.x_train().iter().zip(shocked.x_train().iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-12);
    }
    assert_eq!(calm.scaler(), shocked.scaler());

    // the shock only shows up in the test tensor
    let calm_max = calm.x_test().iter().copied().fold(f64::MIN, f64::max);
    let shocked_max = shocked.x_test().iter().copied().fold(f64::MIN, f64::max);
    assert!(shocked_max > calm_max * 100.0);
}

#[test]
fn training_windows_are_standardized() {
    let config = PreprocessConfig {
        window_size: 2,
        test_split: 0.5,
        ..PreprocessConfig::default()
    };
    let values: Vec<f64> = (0..30).map(|i| 50.0 + f64::from(i * i % 7)).collect();
    let dataset = Preprocessor::new(config)
        .unwrap()
        .prepare(features(values), nil_labels(30).view())
        .unwrap();

    // every training row was fed to the scaler exactly once per window it sits in
    let x = dataset.x_train();
    let n = x.len() as f64;
    let mean = x.iter().sum::<f64>() / n;
    let var = x.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    assert_relative_eq!(mean, 0.0, epsilon = 1e-9);
    assert_relative_eq!(var, 1.0, epsilon = 1e-9);
}

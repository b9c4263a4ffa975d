//! Normalize, window, split and scale in one call.

use ndarray::{Array2, Array3, ArrayView2};
use tribar_types::{FeatureTable, PreprocessConfig};

use crate::error::PreprocessError;
use crate::normalize::percent_change;
use crate::scaler::StandardScaler;
use crate::window::WindowedTensor;

/// Runs the preprocessing stages in order for one configuration.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    config: PreprocessConfig,
}

impl Preprocessor {
    /// Creates a preprocessor after validating `config`.
    ///
    /// # Errors
    /// Returns [`PreprocessError::Config`] for an invalid window or split.
    pub fn new(config: PreprocessConfig) -> Result<Self, PreprocessError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Turns a feature table and its row-aligned one-hot labels into scaled
    /// train and test tensors.
    ///
    /// The scaler is fitted on training windows only and then applied to
    /// both partitions.
    ///
    /// # Errors
    /// Any error of [`percent_change`], [`WindowedTensor::from_rows`],
    /// [`WindowedTensor::split`] or the scaler.
    pub fn prepare(
        &self,
        features: FeatureTable,
        labels: ArrayView2<'_, f64>,
    ) -> Result<PreparedDataset, PreprocessError> {
        let rows = features.len();
        let normalized = percent_change(features)?;
        let feature_names = normalized.names().to_vec();

        let windows = normalized.windows(labels, self.config.window_size)?;
        let split = windows.split(self.config.test_split)?;

        let mut scaler = StandardScaler::new(split.train.feature_dim(), self.config.scaler);
        scaler.fit_windows(split.train.data().view())?;

        let train_scaled = scaler.transform(split.train.data().view())?;
        let test_scaled = scaler.transform(split.test.data().view())?;
        let train = split.train.with_data(train_scaled)?;
        let test = split.test.with_data(test_scaled)?;

        tracing::info!(
            "Prepared {} rows into {} train / {} test windows of {}x{}",
            rows,
            train.batches(),
            test.batches(),
            train.window(),
            train.feature_dim()
        );

        Ok(PreparedDataset {
            train,
            test,
            scaler,
            feature_names,
        })
    }
}

/// Scaled train/test tensors plus the scaler fitted on the training part.
#[derive(Debug, Clone)]
pub struct PreparedDataset {
    train: WindowedTensor,
    test: WindowedTensor,
    scaler: StandardScaler,
    feature_names: Vec<String>,
}

impl PreparedDataset {
    /// Training windows, `(batches, window, features)`.
    #[must_use]
    pub fn x_train(&self) -> &Array3<f64> {
        self.train.data()
    }

    /// Training labels, `(batches, 3)`.
    #[must_use]
    pub fn y_train(&self) -> &Array2<f64> {
        self.train.labels()
    }

    /// Testing windows.
    #[must_use]
    pub fn x_test(&self) -> &Array3<f64> {
        self.test.data()
    }

    /// Testing labels.
    #[must_use]
    pub fn y_test(&self) -> &Array2<f64> {
        self.test.labels()
    }

    /// Training partition with its time bookkeeping.
    #[must_use]
    pub fn train(&self) -> &WindowedTensor {
        &self.train
    }

    /// Testing partition with its time bookkeeping.
    #[must_use]
    pub fn test(&self) -> &WindowedTensor {
        &self.test
    }

    /// Scaler fitted on the training windows.
    #[must_use]
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Feature names in the last tensor axis.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Consumes the dataset, returning `(x_train, y_train, x_test, y_test)`.
    #[must_use]
    pub fn into_tensors(self) -> (Array3<f64>, Array2<f64>, Array3<f64>, Array2<f64>) {
        let (x_train, y_train) = self.train.into_parts();
        let (x_test, y_test) = self.test.into_parts();
        (x_train, y_train, x_test, y_test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn table(rows: usize) -> FeatureTable {
        let values = Array2::from_shape_fn((rows, 2), |(r, c)| 100.0 + (r * (c + 1)) as f64);
        FeatureTable::new(vec!["close".into(), "sma-2".into()], values, 2).unwrap()
    }

    fn labels(rows: usize) -> Array2<f64> {
        Array2::from_shape_fn((rows, 3), |(r, c)| if r % 3 == c { 1.0 } else { 0.0 })
    }

    #[test]
    fn test_prepare_shapes() {
        let config = PreprocessConfig {
            window_size: 3,
            test_split: 0.25,
            ..PreprocessConfig::default()
        };
        let dataset = Preprocessor::new(config)
            .unwrap()
            .prepare(table(15), labels(15).view())
            .unwrap();

        // 12 windows, 9 train, 3 test
        assert_eq!(dataset.x_train().dim(), (9, 3, 2));
        assert_eq!(dataset.y_train().dim(), (9, 3));
        assert_eq!(dataset.x_test().dim(), (3, 3, 2));
        assert_eq!(dataset.y_test().dim(), (3, 3));
        assert_eq!(dataset.feature_names(), &["close".to_string(), "sma-2".to_string()]);
        assert_eq!(dataset.scaler().n_samples(), 27);
        assert_eq!(dataset.test().origin(), 11);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = PreprocessConfig {
            window_size: 0,
            ..PreprocessConfig::default()
        };
        assert!(matches!(
            Preprocessor::new(config),
            Err(PreprocessError::Config(_))
        ));
    }

    #[test]
    fn test_too_few_rows() {
        let preprocessor = Preprocessor::new(PreprocessConfig::default()).unwrap();
        let err = preprocessor.prepare(table(5), labels(5).view()).unwrap_err();
        assert!(matches!(err, PreprocessError::InsufficientRows { .. }));
    }
}

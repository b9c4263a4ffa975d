//! One preparation run over one price series.

use std::sync::Arc;

use ndarray::Array2;
use tribar_features::FeatureEngine;
use tribar_indicators::IndicatorRegistry;
use tribar_labels::{LabelTable, TripleBarrier, one_hot};
use tribar_preprocess::{PreparedDataset, Preprocessor};
use tribar_types::{FeatureTable, PipelineConfig, PriceSeries, TrailingLabels};

use crate::error::PipelineError;

/// Owns the price series plus the feature and label tables built from it,
/// and sequences the stages.
///
/// Labels are always computed from the untransformed prices; normalization
/// only ever sees a copy of the feature table.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    engine: FeatureEngine,
    barrier: TripleBarrier,
    prices: PriceSeries,
    features: Option<FeatureTable>,
    labels: Option<LabelTable>,
}

impl Pipeline {
    /// Creates a pipeline over the default indicator registry.
    ///
    /// # Errors
    /// Returns [`PipelineError::Core`] or [`PipelineError::Label`] when the
    /// configuration is invalid.
    pub fn new(config: PipelineConfig, prices: PriceSeries) -> Result<Self, PipelineError> {
        Self::with_registry(config, prices, Arc::new(IndicatorRegistry::with_defaults()))
    }

    /// Creates a pipeline that resolves indicators through `registry`.
    ///
    /// # Errors
    /// Same as [`Pipeline::new`].
    pub fn with_registry(
        config: PipelineConfig,
        prices: PriceSeries,
        registry: Arc<IndicatorRegistry>,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        let barrier = TripleBarrier::from_config(&config.labels)?;
        Ok(Self {
            config,
            engine: FeatureEngine::new(registry),
            barrier,
            prices,
            features: None,
            labels: None,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Ingested prices.
    #[must_use]
    pub fn prices(&self) -> &PriceSeries {
        &self.prices
    }

    /// Feature table, once built.
    #[must_use]
    pub fn features(&self) -> Option<&FeatureTable> {
        self.features.as_ref()
    }

    /// Label table, once built.
    #[must_use]
    pub fn labels(&self) -> Option<&LabelTable> {
        self.labels.as_ref()
    }

    /// Builds the feature table if it is not built yet.
    ///
    /// # Errors
    /// Returns [`PipelineError::Feature`] from the feature engine.
    pub fn build_features(&mut self) -> Result<&FeatureTable, PipelineError> {
        let table = match self.features.take() {
            Some(table) => table,
            None => self.engine.build(&self.prices, &self.config.indicators)?,
        };
        Ok(self.features.insert(table))
    }

    /// Labels the raw prices if they are not labeled yet.
    ///
    /// # Errors
    /// Returns [`PipelineError::Label`] from the labeler.
    pub fn build_labels(&mut self) -> Result<&LabelTable, PipelineError> {
        if let Some(table) = self.labels.take() {
            return Ok(self.labels.insert(table));
        }

        let table = self.barrier.label(&self.prices)?;
        let counts = table.class_counts();
        tracing::info!(
            "Label distribution: win={}, loss={}, nil={} ({} steps)",
            counts.win,
            counts.loss,
            counts.nil,
            counts.total()
        );
        if counts.win == 0 || counts.loss == 0 || counts.nil == 0 {
            tracing::warn!(
                "At least one label class is empty; check profit={} and reward_risk={}",
                self.config.labels.profit,
                self.config.labels.reward_risk
            );
        }
        Ok(self.labels.insert(table))
    }

    /// Discards built features and labels, back to the raw price column.
    pub fn clear(&mut self) {
        self.features = None;
        self.labels = None;
    }

    /// Builds whatever is missing and runs preprocessing.
    ///
    /// Feature rows and labels are aligned on time index according to the
    /// configured [`TrailingLabels`] policy before windowing.
    ///
    /// # Errors
    /// - [`PipelineError::InsufficientData`] when no feature row has a
    ///   resolved label.
    /// - Any stage error.
    pub fn prepare(&mut self) -> Result<PreparedDataset, PipelineError> {
        let policy = self.config.trailing_labels;
        let available = self.prices.len();
        let features = self.build_features()?.clone();
        let labels = self.build_labels()?;
        let (table, targets) = align(features, labels, policy, available)?;

        let preprocessor = Preprocessor::new(self.config.preprocess)?;
        Ok(preprocessor.prepare(table, targets.view())?)
    }
}

/// Pairs every retained feature row with the one-hot label of its time index.
fn align(
    mut table: FeatureTable,
    labels: &LabelTable,
    policy: TrailingLabels,
    available: usize,
) -> Result<(FeatureTable, Array2<f64>), PipelineError> {
    let origin = table.origin();
    match policy {
        TrailingLabels::Exclude => {
            let keep = labels.len().saturating_sub(origin);
            if keep == 0 {
                return Err(PipelineError::InsufficientData {
                    required: origin + labels.horizon() + 1,
                    available,
                });
            }
            let dropped = table.len() - keep;
            table.truncate(keep);
            tracing::debug!("Dropped {dropped} trailing rows without a resolved label");
            let targets = one_hot(&labels.outcomes()[origin..origin + keep]);
            Ok((table, targets))
        }
        TrailingLabels::PadNil => {
            let padded = labels.padded();
            let targets = one_hot(&padded[origin..origin + table.len()]);
            Ok((table, targets))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribar_labels::Outcome;
    use tribar_types::IndicatorSpec;

    #[allow(clippy::cast_precision_loss)]
    fn wavy(n: usize) -> PriceSeries {
        let values: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1)
            .collect();
        PriceSeries::from_vec(values).unwrap()
    }

    fn config(period: usize, policy: TrailingLabels) -> PipelineConfig {
        let mut config = PipelineConfig {
            indicators: vec![
                IndicatorSpec::new("moving_average", period),
                IndicatorSpec::new("rolling_std", period),
            ],
            trailing_labels: policy,
            ..PipelineConfig::default()
        };
        config.labels.profit = 0.01;
        config
    }

    #[test]
    fn test_build_and_clear() {
        let mut pipeline = Pipeline::new(config(3, TrailingLabels::Exclude), wavy(30)).unwrap();
        assert!(pipeline.features().is_none());

        assert_eq!(pipeline.build_features().unwrap().len(), 27);
        assert_eq!(pipeline.build_labels().unwrap().len(), 25);
        assert_eq!(pipeline.features().unwrap().width(), 3);

        pipeline.clear();
        assert!(pipeline.features().is_none());
        assert!(pipeline.labels().is_none());
        assert_eq!(pipeline.prices().len(), 30);
    }

    #[test]
    fn test_exclude_drops_unresolved_rows() {
        let mut pipeline = Pipeline::new(config(3, TrailingLabels::Exclude), wavy(30)).unwrap();
        let dataset = pipeline.prepare().unwrap();

        // rows at t in 3..25 survive: 22 rows, 17 windows, 9 train / 8 test
        assert_eq!(dataset.x_train().dim(), (9, 5, 3));
        assert_eq!(dataset.x_test().dim(), (8, 5, 3));
        assert_eq!(dataset.test().label_times().end, 25);
        // tables stay untouched by normalization
        assert_eq!(
            pipeline.features().unwrap().value(0, "close"),
            pipeline.prices().get(3)
        );
    }

    #[test]
    fn test_pad_nil_keeps_trailing_rows() {
        let mut pipeline = Pipeline::new(config(3, TrailingLabels::PadNil), wavy(30)).unwrap();
        let dataset = pipeline.prepare().unwrap();

        // 27 rows, 22 windows, 11 / 11
        assert_eq!(dataset.x_train().dim(), (11, 5, 3));
        assert_eq!(dataset.x_test().dim(), (11, 5, 3));
        let nil = Outcome::Nil.one_hot();
        for t in 25..30 {
            let j = t - 3 - 5 - 11;
            assert_eq!(dataset.y_test().row(j).to_vec(), nil.to_vec());
        }
    }

    #[test]
    fn test_no_labeled_feature_row() {
        let mut pipeline = Pipeline::new(config(10, TrailingLabels::Exclude), wavy(12)).unwrap();
        let err = pipeline.prepare().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InsufficientData {
                required: 16,
                available: 12
            }
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut bad = config(3, TrailingLabels::Exclude);
        bad.labels.n_future = 0;
        let err = Pipeline::new(bad, wavy(30)).unwrap_err();
        assert!(err.is_config_error());
    }
}

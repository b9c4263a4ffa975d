//! Feature table construction.

use std::collections::HashSet;
use std::sync::Arc;

use ndarray::Array2;
use tribar_indicators::IndicatorRegistry;
use tribar_types::{FeatureTable, IndicatorSpec, PRICE_COLUMN, PriceSeries};

use crate::error::FeatureError;

/// Applies requested indicators to a price series and trims the warm-up.
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    registry: Arc<IndicatorRegistry>,
}

impl FeatureEngine {
    /// Creates an engine that dispatches through `registry`.
    #[must_use]
    pub fn new(registry: Arc<IndicatorRegistry>) -> Self {
        Self { registry }
    }

    /// Creates an engine over the default registry.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(Arc::new(IndicatorRegistry::with_defaults()))
    }

    /// Registry used for dispatch.
    #[must_use]
    pub fn registry(&self) -> &IndicatorRegistry {
        &self.registry
    }

    /// Builds the feature table for `prices`.
    ///
    /// The raw price is always the first column (`close`), followed by one
    /// `<name>-<period>` column per spec in request order. The first
    /// `max_period` rows are dropped so every retained cell is defined.
    ///
    /// # Errors
    /// - [`FeatureError::Indicator`] for an unknown name or invalid period.
    /// - [`FeatureError::DuplicateColumn`] when two specs share a column name.
    /// - [`FeatureError::InsufficientData`] when the warm-up covers the series.
    /// - [`FeatureError::NonFinite`] when a retained cell is not finite.
    pub fn build(
        &self,
        prices: &PriceSeries,
        specs: &[IndicatorSpec],
    ) -> Result<FeatureTable, FeatureError> {
        let series = prices.as_slice();
        let len = series.len();

        let mut names = Vec::with_capacity(specs.len() + 1);
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(specs.len() + 1);
        let mut seen = HashSet::with_capacity(specs.len() + 1);
        let mut max_period = 0;

        names.push(PRICE_COLUMN.to_string());
        columns.push(series.to_vec());
        seen.insert(PRICE_COLUMN.to_string());

        for spec in specs {
            let indicator = self.registry.create(spec)?;
            let name = spec.column_name();
            if !seen.insert(name.clone()) {
                return Err(FeatureError::DuplicateColumn(name));
            }
            max_period = max_period.max(indicator.warmup_periods());
            columns.push(indicator.compute(series));
            names.push(name);
        }

        if max_period >= len {
            return Err(FeatureError::InsufficientData {
                required: max_period + 1,
                available: len,
            });
        }

        let rows = len - max_period;
        let values = Array2::from_shape_fn((rows, columns.len()), |(r, c)| {
            columns[c][r + max_period]
        });
        let table = FeatureTable::new(names, values, max_period)?;

        if let Some((row, col)) = table.first_non_finite() {
            return Err(FeatureError::NonFinite {
                column: table.names()[col].clone(),
                time_index: table.time_index(row),
            });
        }

        tracing::debug!(
            "Feature table built: {} columns, {} rows ({} warm-up rows dropped)",
            table.width(),
            table.len(),
            max_period
        );

        Ok(table)
    }
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

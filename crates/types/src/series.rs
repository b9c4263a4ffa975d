//! Ingested price series.

use ndarray::ArrayView2;

use crate::error::CoreError;

/// Ordered single-column price sequence indexed by discrete time step.
///
/// Values are copied on ingestion and never mutated afterwards, so callers
/// cannot observe changes made by later stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    values: Vec<f64>,
}

impl PriceSeries {
    /// Copies `values` into a new series.
    ///
    /// # Errors
    /// - [`CoreError::EmptySeries`] when `values` is empty.
    /// - [`CoreError::NonFinite`] when any value is NaN or infinite.
    pub fn from_slice(values: &[f64]) -> Result<Self, CoreError> {
        Self::from_vec(values.to_vec())
    }

    /// Takes ownership of `values` as a new series.
    ///
    /// # Errors
    /// Same as [`PriceSeries::from_slice`].
    pub fn from_vec(values: Vec<f64>) -> Result<Self, CoreError> {
        if values.is_empty() {
            return Err(CoreError::EmptySeries);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CoreError::NonFinite { index, value });
        }
        Ok(Self { values })
    }

    /// Builds a series from a `(rows, columns)` matrix that must hold exactly
    /// one price column.
    ///
    /// # Errors
    /// - [`CoreError::Shape`] when the matrix does not have exactly one column.
    /// - Same as [`PriceSeries::from_slice`] for the column contents.
    pub fn from_matrix(matrix: ArrayView2<'_, f64>) -> Result<Self, CoreError> {
        let (_, cols) = matrix.dim();
        if cols != 1 {
            return Err(CoreError::shape(format!(
                "expected a single price column, got {cols}"
            )));
        }
        Self::from_vec(matrix.column(0).to_vec())
    }

    /// Number of time steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the series holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Price at time index `idx`.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied()
    }

    /// Borrowed view of all prices in time order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for PriceSeries {
    type Error = CoreError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_vec(values)
    }
}

impl AsRef<[f64]> for PriceSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

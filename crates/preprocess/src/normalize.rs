//! Percent-change normalization.

use ndarray::{Array2, ArrayView1};
use tribar_types::FeatureTable;

use crate::error::PreprocessError;
use crate::window::WindowedTensor;

/// Feature table after percent-change normalization.
///
/// Only [`percent_change`] produces this type, and it consumes the raw
/// table, so a table cannot be normalized twice.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFeatures {
    names: Vec<String>,
    values: Array2<f64>,
    origin: usize,
}

impl NormalizedFeatures {
    /// Column names in table order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Normalized `(rows, columns)` matrix.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Time index of row 0.
    #[must_use]
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    /// Returns true when there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Number of feature columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Column values by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(self.values.column(idx))
    }

    /// Builds overlapping windows of `window` rows; `labels` must be aligned
    /// one-to-one with the rows.
    ///
    /// # Errors
    /// See [`WindowedTensor::from_rows`].
    pub fn windows(
        &self,
        labels: ndarray::ArrayView2<'_, f64>,
        window: usize,
    ) -> Result<WindowedTensor, PreprocessError> {
        WindowedTensor::from_rows(self.values.view(), labels, window, self.origin)
    }
}

/// Replaces every column by its step-to-step percent change.
///
/// For `t` from the last row down to 1,
/// `x[t] = 100 * (x[t] - x[t-1]) / x[t-1]`, reading the untransformed
/// `x[t-1]`; then `x[0] = 0`.
///
/// # Errors
/// - [`PreprocessError::DivisionByZero`] when a divisor `x[t-1]` is zero.
/// - [`PreprocessError::NonFinite`] when a change overflows.
pub fn percent_change(table: FeatureTable) -> Result<NormalizedFeatures, PreprocessError> {
    let (names, mut values, origin) = table.into_parts();

    for (c, mut column) in values.columns_mut().into_iter().enumerate() {
        let rows = column.len();
        // reverse pass: x[t-1] is still untouched when x[t] is rewritten
        for t in (1..rows).rev() {
            let prev = column[t - 1];
            if prev == 0.0 {
                return Err(PreprocessError::DivisionByZero {
                    column: names[c].clone(),
                    time_index: origin + t - 1,
                });
            }
            let change = 100.0 * (column[t] - prev) / prev;
            if !change.is_finite() {
                return Err(PreprocessError::NonFinite(format!(
                    "percent change of column '{}' at time index {}",
                    names[c],
                    origin + t
                )));
            }
            column[t] = change;
        }
        if rows > 0 {
            column[0] = 0.0;
        }
    }

    Ok(NormalizedFeatures {
        names,
        values,
        origin,
    })
}

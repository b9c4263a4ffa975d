//! Named feature table over a dense matrix.

use std::collections::HashSet;
use std::ops::Range;

use ndarray::{Array2, ArrayView1, Axis, s};

use crate::error::CoreError;

/// Name of the raw price column carried by every feature table.
pub const PRICE_COLUMN: &str = "close";

/// Dense feature table: one row per retained time step, one column per
/// feature.
///
/// Row `r` holds the values observed at time index `origin + r` of the price
/// series the table was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    names: Vec<String>,
    values: Array2<f64>,
    origin: usize,
}

impl FeatureTable {
    /// Creates a table from column names and a `(rows, columns)` matrix.
    ///
    /// # Errors
    /// Returns [`CoreError::Shape`] when the name count differs from the
    /// column count, and [`CoreError::Config`] when a name is repeated.
    pub fn new(names: Vec<String>, values: Array2<f64>, origin: usize) -> Result<Self, CoreError> {
        if names.len() != values.ncols() {
            return Err(CoreError::shape(format!(
                "{} column names for {} columns",
                names.len(),
                values.ncols()
            )));
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::config(format!("duplicate feature column '{name}'")));
            }
        }
        Ok(Self {
            names,
            values,
            origin,
        })
    }

    /// Column names in table order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Underlying `(rows, columns)` matrix.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Consumes the table, returning names, matrix and origin.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Array2<f64>, usize) {
        (self.names, self.values, self.origin)
    }

    /// Number of rows (time steps).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    /// Returns true when no row is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Number of feature columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Time index of row 0.
    #[must_use]
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Time index of row `row`.
    #[must_use]
    pub fn time_index(&self, row: usize) -> usize {
        self.origin + row
    }

    /// Half-open range of time indices covered by the table.
    #[must_use]
    pub fn time_range(&self) -> Range<usize> {
        self.origin..self.origin + self.len()
    }

    /// Position of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Column values by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.column_index(name).map(|idx| self.values.column(idx))
    }

    /// Row values in column order.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<ArrayView1<'_, f64>> {
        (row < self.len()).then(|| self.values.row(row))
    }

    /// Single cell by row and column name.
    #[must_use]
    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        let col = self.column_index(name)?;
        self.values.get((row, col)).copied()
    }

    /// Keeps only the first `rows` rows; no-op when `rows >= len()`.
    pub fn truncate(&mut self, rows: usize) {
        if rows < self.len() {
            self.values = self.values.slice(s![..rows, ..]).to_owned();
        }
    }

    /// Returns the first `(row, column)` holding a non-finite value.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.values
            .axis_iter(Axis(0))
            .enumerate()
            .find_map(|(r, row)| row.iter().position(|v| !v.is_finite()).map(|c| (r, c)))
    }
}

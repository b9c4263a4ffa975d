//! Label table aligned with the label-eligible prefix of a price series.

use ndarray::Array2;

use crate::outcome::{ClassCounts, Outcome};

/// Outcomes for time steps `0..series_len - horizon`.
///
/// Entries are always resolved; the trailing `horizon` steps are not stored
/// and only appear, as [`Outcome::Unresolved`], through
/// [`LabelTable::padded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    outcomes: Vec<Outcome>,
    horizon: usize,
}

impl LabelTable {
    pub(crate) fn new(outcomes: Vec<Outcome>, horizon: usize) -> Self {
        Self { outcomes, horizon }
    }

    /// Number of label-eligible steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Returns true when no step is label-eligible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Forward window length used to build the table.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Length of the price series the table was built from.
    #[must_use]
    pub fn series_len(&self) -> usize {
        self.outcomes.len() + self.horizon
    }

    /// Outcome at time index `idx`, `None` beyond the eligible prefix.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Outcome> {
        self.outcomes.get(idx).copied()
    }

    /// Eligible outcomes in time order.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Outcomes for every step of the series, the trailing ones marked
    /// [`Outcome::Unresolved`].
    #[must_use]
    pub fn padded(&self) -> Vec<Outcome> {
        let mut all = Vec::with_capacity(self.series_len());
        all.extend_from_slice(&self.outcomes);
        all.resize(self.series_len(), Outcome::Unresolved);
        all
    }

    /// One-hot `(len, 3)` matrix with columns `(win, loss, nil)`.
    #[must_use]
    pub fn one_hot(&self) -> Array2<f64> {
        one_hot(&self.outcomes)
    }

    /// Win/loss/nil distribution of the eligible steps.
    #[must_use]
    pub fn class_counts(&self) -> ClassCounts {
        let mut counts = ClassCounts::default();
        for &outcome in &self.outcomes {
            counts.add(outcome);
        }
        counts
    }
}

/// Encodes `outcomes` as a `(len, 3)` one-hot matrix.
#[must_use]
pub fn one_hot(outcomes: &[Outcome]) -> Array2<f64> {
    let mut matrix = Array2::zeros((outcomes.len(), 3));
    for (mut row, outcome) in matrix.rows_mut().into_iter().zip(outcomes) {
        for (cell, value) in row.iter_mut().zip(outcome.one_hot()) {
            *cell = value;
        }
    }
    matrix
}

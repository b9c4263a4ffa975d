//! Overlapping fixed-width windows and their chronological split.

use std::ops::Range;

use ndarray::{Array2, Array3, ArrayView2, s};

use crate::error::PreprocessError;

/// Stack of overlapping windows with one aligned label row per window.
///
/// Window `j` holds feature rows `[j, j + W)`; its label is the label of
/// row `j + W`, the step right after the window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedTensor {
    data: Array3<f64>,
    labels: Array2<f64>,
    origin: usize,
}

impl WindowedTensor {
    /// Builds `rows - window` windows from a `(rows, features)` matrix.
    ///
    /// `labels` must have one row per feature row; `origin` is the time index
    /// of feature row 0.
    ///
    /// # Errors
    /// - [`PreprocessError::ZeroWindow`] when `window == 0`.
    /// - [`PreprocessError::LabelMismatch`] when label and feature row counts
    ///   differ.
    /// - [`PreprocessError::InsufficientRows`] when `rows <= window`.
    pub fn from_rows(
        values: ArrayView2<'_, f64>,
        labels: ArrayView2<'_, f64>,
        window: usize,
        origin: usize,
    ) -> Result<Self, PreprocessError> {
        if window == 0 {
            return Err(PreprocessError::ZeroWindow);
        }
        let (rows, features) = values.dim();
        if labels.nrows() != rows {
            return Err(PreprocessError::LabelMismatch {
                features: rows,
                labels: labels.nrows(),
            });
        }
        if rows <= window {
            return Err(PreprocessError::InsufficientRows { rows, window });
        }

        let batches = rows - window;
        let mut data = Array3::zeros((batches, window, features));
        for (j, mut slot) in data.outer_iter_mut().enumerate() {
            slot.assign(&values.slice(s![j..j + window, ..]));
        }
        let labels = labels.slice(s![window.., ..]).to_owned();

        Ok(Self {
            data,
            labels,
            origin,
        })
    }

    /// `(batches, window, features)` tensor.
    #[must_use]
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// `(batches, label_width)` labels aligned with the windows.
    #[must_use]
    pub fn labels(&self) -> &Array2<f64> {
        &self.labels
    }

    /// Consumes the tensor, returning data and labels.
    #[must_use]
    pub fn into_parts(self) -> (Array3<f64>, Array2<f64>) {
        (self.data, self.labels)
    }

    /// Number of windows.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.data.dim().0
    }

    /// Returns true when there are no windows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches() == 0
    }

    /// Rows per window.
    #[must_use]
    pub fn window(&self) -> usize {
        self.data.dim().1
    }

    /// Features per row.
    #[must_use]
    pub fn feature_dim(&self) -> usize {
        self.data.dim().2
    }

    /// Time index of the first row of window 0.
    #[must_use]
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Time indices covered by the rows of window `j`.
    #[must_use]
    pub fn row_span(&self, j: usize) -> Range<usize> {
        let start = self.origin + j;
        start..start + self.window()
    }

    /// Time index of the label attached to window `j`.
    #[must_use]
    pub fn label_time(&self, j: usize) -> usize {
        self.origin + j + self.window()
    }

    /// Label times of all windows, in order.
    #[must_use]
    pub fn label_times(&self) -> Range<usize> {
        self.label_time(0)..self.label_time(self.batches())
    }

    /// Replaces the window data with a tensor of the same shape.
    ///
    /// # Errors
    /// Returns [`PreprocessError::ShapeMismatch`] when the shapes differ.
    pub fn with_data(self, data: Array3<f64>) -> Result<Self, PreprocessError> {
        if data.dim() != self.data.dim() {
            return Err(PreprocessError::ShapeMismatch {
                expected: self.data.dim(),
                actual: data.dim(),
            });
        }
        Ok(Self { data, ..self })
    }

    /// Splits into a training prefix and a testing suffix without shuffling.
    ///
    /// The training partition holds `round(batches * (1 - test_split))`
    /// windows.
    ///
    /// # Errors
    /// Returns [`PreprocessError::InvalidSplit`] when `test_split` is outside
    /// `[0, 1)` or the training partition would be empty.
    pub fn split(self, test_split: f64) -> Result<Split, PreprocessError> {
        let train_len = train_len(self.batches(), test_split)?;
        let window = self.window();

        let train = WindowedTensor {
            data: self.data.slice(s![..train_len, .., ..]).to_owned(),
            labels: self.labels.slice(s![..train_len, ..]).to_owned(),
            origin: self.origin,
        };
        let test = WindowedTensor {
            data: self.data.slice(s![train_len.., .., ..]).to_owned(),
            labels: self.labels.slice(s![train_len.., ..]).to_owned(),
            origin: self.origin + train_len,
        };

        tracing::debug!(
            "Chronological split: {} train / {} test windows (width {})",
            train.batches(),
            test.batches(),
            window
        );

        Ok(Split { train, test })
    }
}

/// Training and testing partitions of a [`WindowedTensor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Chronologically first windows.
    pub train: WindowedTensor,
    /// Remaining windows, all later than every training window.
    pub test: WindowedTensor,
}

/// Number of training windows for `batches` windows and a test fraction.
///
/// # Errors
/// Returns [`PreprocessError::InvalidSplit`] when `test_split` is outside
/// `[0, 1)` or the result is zero.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn train_len(batches: usize, test_split: f64) -> Result<usize, PreprocessError> {
    if !test_split.is_finite() || !(0.0..1.0).contains(&test_split) {
        return Err(PreprocessError::InvalidSplit(format!(
            "test_split must be in [0, 1), got {test_split}"
        )));
    }
    let train = ((batches as f64) * (1.0 - test_split)).round() as usize;
    let train = train.min(batches);
    if train == 0 {
        return Err(PreprocessError::InvalidSplit(format!(
            "no training windows: {batches} windows with test_split {test_split}"
        )));
    }
    Ok(train)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn rows(n: usize, features: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, features), |(r, c)| (r * 10 + c) as f64)
    }

    fn labels(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 1), |(r, _)| r as f64)
    }

    #[test]
    fn test_window_count_and_contents() {
        let tensor = WindowedTensor::from_rows(rows(6, 2).view(), labels(6).view(), 3, 10).unwrap();

        assert_eq!(tensor.batches(), 3);
        assert_eq!(tensor.data().dim(), (3, 3, 2));
        assert_eq!(tensor.data()[[0, 0, 0]], 0.0);
        assert_eq!(tensor.data()[[2, 2, 1]], 41.0);
        // label of window j is label of row j + W
        assert_eq!(tensor.labels().column(0).to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(tensor.row_span(1), 11..14);
        assert_eq!(tensor.label_time(1), 14);
        assert_eq!(tensor.label_times(), 13..16);
    }

    #[test]
    fn test_windows_slide_by_one() {
        let tensor = WindowedTensor::from_rows(rows(8, 1).view(), labels(8).view(), 4, 0).unwrap();
        for j in 0..tensor.batches() - 1 {
            let a = tensor.data().slice(s![j, 1.., ..]).to_owned();
            let b = tensor.data().slice(s![j + 1, ..3, ..]).to_owned();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            WindowedTensor::from_rows(rows(5, 1).view(), labels(5).view(), 0, 0),
            Err(PreprocessError::ZeroWindow)
        ));
        assert!(matches!(
            WindowedTensor::from_rows(rows(5, 1).view(), labels(5).view(), 5, 0),
            Err(PreprocessError::InsufficientRows { rows: 5, window: 5 })
        ));
        assert!(matches!(
            WindowedTensor::from_rows(rows(5, 1).view(), labels(4).view(), 2, 0),
            Err(PreprocessError::LabelMismatch { .. })
        ));
    }

    #[test]
    fn test_train_len_rounding() {
        assert_eq!(train_len(10, 0.5).unwrap(), 5);
        assert_eq!(train_len(5, 0.5).unwrap(), 3);
        assert_eq!(train_len(7, 0.0).unwrap(), 7);
        assert!(train_len(1, 0.9).is_err());
        assert!(train_len(10, 1.0).is_err());
        assert!(train_len(10, f64::NAN).is_err());
    }

    #[test]
    fn test_split_is_chronological() {
        let tensor = WindowedTensor::from_rows(rows(12, 1).view(), labels(12).view(), 2, 0).unwrap();
        let split = tensor.split(0.3).unwrap();

        assert_eq!(split.train.batches(), 7);
        assert_eq!(split.test.batches(), 3);
        assert_eq!(split.test.origin(), 7);
        assert!(split.train.label_times().end <= split.test.label_times().start);
        assert_eq!(split.test.labels()[[0, 0]], 9.0);
    }

    #[test]
    fn test_with_data_checks_shape() {
        let tensor = WindowedTensor::from_rows(rows(4, 1).view(), labels(4).view(), 2, 0).unwrap();
        assert!(tensor.clone().with_data(Array3::zeros((2, 2, 1))).is_ok());
        assert!(matches!(
            tensor.with_data(Array3::zeros((2, 2, 2))),
            Err(PreprocessError::ShapeMismatch {
                expected: (2, 2, 1),
                actual: (2, 2, 2)
            })
        ));
    }
}

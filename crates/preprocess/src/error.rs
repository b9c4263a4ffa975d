//! Preprocessing error types.

use thiserror::Error;
use tribar_types::{CoreError, ErrorKind};

/// Errors that can occur while normalizing, windowing, splitting or scaling.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// Invalid preprocessing configuration
    #[error(transparent)]
    Config(#[from] CoreError),

    /// Percent change against a zero previous value
    #[error("division by zero in column '{column}': value at time index {time_index} is 0")]
    DivisionByZero {
        /// Column name.
        column: String,
        /// Time index of the zero divisor.
        time_index: usize,
    },

    /// A computed or supplied value is NaN or infinite
    #[error("non-finite value: {0}")]
    NonFinite(String),

    /// Not enough rows to form a single window
    #[error("insufficient rows: {rows} rows cannot form a window of {window}")]
    InsufficientRows {
        /// Available rows.
        rows: usize,
        /// Requested window width.
        window: usize,
    },

    /// Window width of zero
    #[error("window size must be > 0")]
    ZeroWindow,

    /// Labels are not aligned with the feature rows
    #[error("label rows ({labels}) do not match feature rows ({features})")]
    LabelMismatch {
        /// Feature row count.
        features: usize,
        /// Label row count.
        labels: usize,
    },

    /// Invalid split ratio or empty training partition
    #[error("invalid split: {0}")]
    InvalidSplit(String),

    /// Feature count differs from the one the scaler was built for
    #[error("feature count mismatch: expected {expected}, got {actual}")]
    FeatureMismatch {
        /// Expected feature count.
        expected: usize,
        /// Actual feature count.
        actual: usize,
    },

    /// Replacement tensor does not match the `(batches, window, features)` shape
    #[error("tensor shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// Expected shape.
        expected: (usize, usize, usize),
        /// Actual shape.
        actual: (usize, usize, usize),
    },

    /// Transform requested before any training data was seen
    #[error("scaler has not been fitted")]
    NotFitted,
}

impl PreprocessError {
    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreprocessError::Config(err) => err.kind(),
            PreprocessError::DivisionByZero { .. } | PreprocessError::NonFinite(_) => {
                ErrorKind::Arithmetic
            }
            PreprocessError::LabelMismatch { .. }
            | PreprocessError::FeatureMismatch { .. }
            | PreprocessError::ShapeMismatch { .. } => ErrorKind::Shape,
            PreprocessError::InsufficientRows { .. }
            | PreprocessError::ZeroWindow
            | PreprocessError::InvalidSplit(_)
            | PreprocessError::NotFitted => ErrorKind::Config,
        }
    }
}

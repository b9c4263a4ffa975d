//! Feature engine error types.

use thiserror::Error;
use tribar_indicators::IndicatorError;
use tribar_types::{CoreError, ErrorKind};

/// Errors that can occur while building a feature table.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Indicator lookup or construction failed
    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    /// Table construction failed
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Two requests map to the same column name
    #[error("duplicate feature column: {0}")]
    DuplicateColumn(String),

    /// The warm-up would drop every row
    #[error("insufficient data: need {required} prices, have {available}")]
    InsufficientData {
        /// Required number of prices.
        required: usize,
        /// Available number of prices.
        available: usize,
    },

    /// A retained cell is NaN or infinite
    #[error("non-finite value in column '{column}' at time index {time_index}")]
    NonFinite {
        /// Column name.
        column: String,
        /// Time index of the offending row.
        time_index: usize,
    },
}

impl FeatureError {
    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeatureError::Indicator(err) => err.kind(),
            FeatureError::Core(err) => err.kind(),
            FeatureError::DuplicateColumn(_) | FeatureError::InsufficientData { .. } => {
                ErrorKind::Config
            }
            FeatureError::NonFinite { .. } => ErrorKind::Arithmetic,
        }
    }
}

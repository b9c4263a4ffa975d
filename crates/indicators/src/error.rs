//! Indicator error types.

use thiserror::Error;
use tribar_types::ErrorKind;

/// Errors that can occur during indicator creation or registry lookup.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// Unknown indicator name requested from registry
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    /// Period outside the range the indicator supports
    #[error("period out of range for {indicator}: {period} (minimum {min})")]
    PeriodOutOfRange {
        /// Indicator name.
        indicator: String,
        /// Requested period.
        period: usize,
        /// Smallest accepted period.
        min: usize,
    },
}

impl IndicatorError {
    /// Creates a `PeriodOutOfRange` error.
    #[must_use]
    pub fn period_out_of_range(indicator: impl Into<String>, period: usize, min: usize) -> Self {
        IndicatorError::PeriodOutOfRange {
            indicator: indicator.into(),
            period,
            min,
        }
    }

    /// Every indicator failure is a configuration problem.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

//! Built-in indicator kinds and the direct `compute` entry point.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::IndicatorError;
use crate::impl_::{moving_average::MovingAverage, rolling_std::RollingStd};
use crate::traits::Indicator;

/// Built-in rolling statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Arithmetic mean over the window.
    MovingAverage,
    /// Sample standard deviation over the window.
    RollingStd,
}

impl IndicatorKind {
    /// Canonical name, as used in feature column names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            IndicatorKind::MovingAverage => MovingAverage::NAME,
            IndicatorKind::RollingStd => RollingStd::NAME,
        }
    }

    /// Builds the indicator for `period`.
    ///
    /// # Errors
    /// Returns [`IndicatorError::PeriodOutOfRange`] when the period is below
    /// the indicator's minimum.
    pub fn build(self, period: usize) -> Result<Arc<dyn Indicator>, IndicatorError> {
        Ok(match self {
            IndicatorKind::MovingAverage => Arc::new(MovingAverage::new(period)?),
            IndicatorKind::RollingStd => Arc::new(RollingStd::new(period)?),
        })
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moving_average" | "sma" => Ok(IndicatorKind::MovingAverage),
            "rolling_std" | "std" => Ok(IndicatorKind::RollingStd),
            other => Err(IndicatorError::UnknownIndicator(other.to_string())),
        }
    }
}

/// Computes a built-in indicator over `series`.
///
/// The output has the length of `series`; positions without a full lookback
/// are `f64::NAN`. A period longer than the series yields an all-NaN output
/// rather than an error, leaving the warm-up check to the caller.
///
/// # Errors
/// Returns [`IndicatorError::PeriodOutOfRange`] for a period below the
/// indicator's minimum.
pub fn compute(series: &[f64], kind: IndicatorKind, period: usize) -> Result<Vec<f64>, IndicatorError> {
    Ok(kind.build(period)?.compute(series))
}

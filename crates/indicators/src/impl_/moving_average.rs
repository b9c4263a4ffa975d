//! Simple moving average

use crate::error::IndicatorError;
use crate::traits::Indicator;

/// Simple Moving Average
///
/// Arithmetic mean of the last `period` values, maintained as a running sum.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    period: usize,
}

impl MovingAverage {
    /// Canonical registry name.
    pub const NAME: &'static str = "moving_average";

    /// Creates a moving average over `period` values.
    ///
    /// # Errors
    /// Returns [`IndicatorError::PeriodOutOfRange`] when `period == 0`.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::period_out_of_range(Self::NAME, period, 1));
        }
        Ok(Self { period })
    }
}

impl Indicator for MovingAverage {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, series: &[f64]) -> Vec<f64> {
        let len = series.len();
        let mut result = vec![f64::NAN; len];

        if len < self.period {
            return result;
        }

        let n = self.period as f64;
        let mut sum: f64 = series[..self.period].iter().sum();
        result[self.period - 1] = sum / n;

        for i in self.period..len {
            sum += series[i] - series[i - self.period];
            result[i] = sum / n;
        }

        result
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn warmup_periods(&self) -> usize {
        self.period
    }
}

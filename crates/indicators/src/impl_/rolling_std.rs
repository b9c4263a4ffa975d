//! Rolling standard deviation

use crate::error::IndicatorError;
use crate::traits::Indicator;

/// Rolling sample standard deviation (ddof = 1) over the last `period`
/// values.
///
/// The sample estimator needs at least two observations, so the smallest
/// accepted period is 2.
#[derive(Debug, Clone)]
pub struct RollingStd {
    period: usize,
}

impl RollingStd {
    /// Canonical registry name.
    pub const NAME: &'static str = "rolling_std";

    /// Creates a rolling standard deviation over `period` values.
    ///
    /// # Errors
    /// Returns [`IndicatorError::PeriodOutOfRange`] when `period < 2`.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period < 2 {
            return Err(IndicatorError::period_out_of_range(Self::NAME, period, 2));
        }
        Ok(Self { period })
    }
}

impl Indicator for RollingStd {
    #[allow(clippy::cast_precision_loss)]
    fn compute(&self, series: &[f64]) -> Vec<f64> {
        let len = series.len();
        let mut result = vec![f64::NAN; len];

        if len < self.period {
            return result;
        }

        let n = self.period as f64;
        for i in (self.period - 1)..len {
            let window = &series[i + 1 - self.period..=i];
            let mean = window.iter().sum::<f64>() / n;
            let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            result[i] = variance.sqrt();
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

//! Indicator capability trait.

/// Rolling statistic over a numeric sequence.
///
/// Implementations are pure: the output has the same length as the input and
/// positions without a full lookback are `f64::NAN`.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for every position of `series`.
    ///
    /// Values at indices `< warmup_periods() - 1` are `f64::NAN`. When the
    /// series is shorter than the period every value is `f64::NAN`.
    fn compute(&self, series: &[f64]) -> Vec<f64>;

    /// Canonical name of the indicator (e.g. `moving_average`).
    fn name(&self) -> &str;

    /// Lookback window length.
    fn warmup_periods(&self) -> usize;
}

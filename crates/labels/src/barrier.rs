//! Triple-barrier labeling.
//!
//! For each eligible step `i` a long trade is opened at `price[i]` with a
//! take-profit barrier `U = price[i] * (1 + profit)` and a stop-loss barrier
//! `D = price[i] * (1 - profit / reward_risk)`. Steps `i..i + n_future` are
//! scanned in time order and the first barrier touched decides the label.
//! When both are touched at the same step the take-profit wins.

use tribar_types::{LabelConfig, PriceSeries};

use crate::error::LabelError;
use crate::outcome::Outcome;
use crate::table::LabelTable;

/// Triple-barrier labeler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripleBarrier {
    profit: f64,
    reward_risk: f64,
    n_future: usize,
}

impl TripleBarrier {
    /// Creates a labeler.
    ///
    /// # Errors
    /// Returns [`LabelError::InvalidParams`] when `profit` or `reward_risk` is
    /// not a positive finite number, or `n_future == 0`.
    pub fn new(profit: f64, reward_risk: f64, n_future: usize) -> Result<Self, LabelError> {
        if !profit.is_finite() || profit <= 0.0 {
            return Err(LabelError::InvalidParams(format!(
                "profit must be > 0, got {profit}"
            )));
        }
        if !reward_risk.is_finite() || reward_risk <= 0.0 {
            return Err(LabelError::InvalidParams(format!(
                "reward_risk must be > 0, got {reward_risk}"
            )));
        }
        if n_future == 0 {
            return Err(LabelError::InvalidParams("n_future must be >= 1".to_string()));
        }
        Ok(Self {
            profit,
            reward_risk,
            n_future,
        })
    }

    /// Creates a labeler from configuration.
    ///
    /// # Errors
    /// Same as [`TripleBarrier::new`].
    pub fn from_config(config: &LabelConfig) -> Result<Self, LabelError> {
        Self::new(config.profit, config.reward_risk, config.n_future)
    }

    /// Forward window length.
    #[must_use]
    pub fn n_future(&self) -> usize {
        self.n_future
    }

    /// `(upper, lower)` barriers for a reference price.
    #[must_use]
    pub fn barriers(&self, reference: f64) -> (f64, f64) {
        (
            reference * (1.0 + self.profit),
            reference * (1.0 - self.profit / self.reward_risk),
        )
    }

    /// Labels every eligible step of `prices`.
    ///
    /// # Errors
    /// - [`LabelError::HorizonTooLong`] when `n_future >= prices.len()`.
    /// - [`LabelError::ZeroReferencePrice`] when an eligible price is zero.
    pub fn label(&self, prices: &PriceSeries) -> Result<LabelTable, LabelError> {
        let series = prices.as_slice();
        let len = series.len();
        if self.n_future >= len {
            return Err(LabelError::HorizonTooLong {
                n_future: self.n_future,
                len,
            });
        }

        let eligible = len - self.n_future;
        let mut outcomes = Vec::with_capacity(eligible);
        for (i, &reference) in series[..eligible].iter().enumerate() {
            if reference == 0.0 {
                return Err(LabelError::ZeroReferencePrice { index: i });
            }
            let (upper, lower) = self.barriers(reference);
            outcomes.push(scan(&series[i..i + self.n_future], upper, lower));
        }

        let table = LabelTable::new(outcomes, self.n_future);
        let counts = table.class_counts();
        tracing::debug!(
            "Labeled {} steps ({} trailing unresolved): win={}, loss={}, nil={}",
            table.len(),
            self.n_future,
            counts.win,
            counts.loss,
            counts.nil
        );

        Ok(table)
    }
}

impl Default for TripleBarrier {
    fn default() -> Self {
        let config = LabelConfig::default();
        Self {
            profit: config.profit,
            reward_risk: config.reward_risk,
            n_future: config.n_future,
        }
    }
}

/// First barrier touched within `window`; upper checked before lower.
fn scan(window: &[f64], upper: f64, lower: f64) -> Outcome {
    for &price in window {
        if price >= upper {
            return Outcome::Win;
        }
        if price <= lower {
            return Outcome::Loss;
        }
    }
    Outcome::Nil
}

/// Labels `prices` with the given barrier parameters.
///
/// # Errors
/// Any error from [`TripleBarrier::new`] or [`TripleBarrier::label`].
pub fn label(
    prices: &PriceSeries,
    profit: f64,
    reward_risk: f64,
    n_future: usize,
) -> Result<LabelTable, LabelError> {
    TripleBarrier::new(profit, reward_risk, n_future)?.label(prices)
}

//! Indicator implementations

pub mod moving_average;
pub mod rolling_std;

//! Tribar Indicators
//!
//! Pure rolling statistics over a price sequence, dispatched by name through
//! an explicit registry.
//!
//! # Available Indicators
//! - `moving_average` (alias `sma`): simple moving average
//! - `rolling_std` (alias `std`): rolling sample standard deviation

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod error;
pub mod impl_;
pub mod kind;
pub mod registry;
pub mod traits;

// Re-export main types
pub use error::IndicatorError;
pub use kind::{IndicatorKind, compute};
pub use registry::{IndicatorFactory, IndicatorRegistry};
pub use traits::Indicator;

pub use impl_::{moving_average::MovingAverage, rolling_std::RollingStd};

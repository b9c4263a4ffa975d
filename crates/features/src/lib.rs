//! Tribar Features
//!
//! Builds the feature table: the raw price column plus one column per
//! requested indicator, with the indicator warm-up trimmed so that every
//! retained row is fully defined.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod engine;
pub mod error;

pub use engine::FeatureEngine;
pub use error::FeatureError;

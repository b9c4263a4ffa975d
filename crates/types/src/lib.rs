//! Tribar Types
//!
//! Core data structures for the tribar preparation pipeline: the ingested
//! price series, the feature table, configuration, and the error taxonomy
//! shared by every stage.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod series;
pub mod table;

// Re-export main types for convenience
pub use config::{
    IndicatorSpec, LabelConfig, PipelineConfig, PreprocessConfig, ScalerConfig, TrailingLabels,
};
pub use error::{CoreError, ErrorKind};
pub use series::PriceSeries;
pub use table::{FeatureTable, PRICE_COLUMN};

//! Tribar Pipeline
//!
//! Sequences feature building, triple-barrier labeling and preprocessing
//! for one price series, yielding `(x_train, y_train, x_test, y_test)`.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod error;
pub mod pipeline;
pub mod runner;

pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use runner::prepare_from_json;

pub use tribar_preprocess::PreparedDataset;

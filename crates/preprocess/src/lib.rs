//! Preprocessing for tribar.
//!
//! Turns a feature table and its row-aligned labels into model-ready
//! tensors:
//! - [`percent_change`] normalization (consumes the table)
//! - overlapping [`WindowedTensor`] windows with one label per window
//! - chronological train/test [`Split`]
//! - [`StandardScaler`] fitted on training windows only
//!
//! [`Preprocessor`] runs the four stages in order.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod error;
pub mod normalize;
pub mod preprocessor;
pub mod scaler;
pub mod window;

pub use error::PreprocessError;
pub use normalize::{NormalizedFeatures, percent_change};
pub use preprocessor::{PreparedDataset, Preprocessor};
pub use scaler::StandardScaler;
pub use window::{Split, WindowedTensor, train_len};

//! Labeling error types.

use thiserror::Error;
use tribar_types::ErrorKind;

/// Errors that can occur during triple-barrier labeling.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Invalid barrier parameters
    #[error("invalid label parameters: {0}")]
    InvalidParams(String),

    /// Forward window does not fit in the series
    #[error("n_future {n_future} must be smaller than the series length {len}")]
    HorizonTooLong {
        /// Requested forward window.
        n_future: usize,
        /// Series length.
        len: usize,
    },

    /// A reference price of zero collapses both barriers onto zero
    #[error("reference price is zero at index {index}")]
    ZeroReferencePrice {
        /// Time index of the reference price.
        index: usize,
    },
}

impl LabelError {
    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabelError::InvalidParams(_) | LabelError::HorizonTooLong { .. } => ErrorKind::Config,
            LabelError::ZeroReferencePrice { .. } => ErrorKind::Arithmetic,
        }
    }
}

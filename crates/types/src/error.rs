//! Error taxonomy shared by every stage.

use std::fmt;

use thiserror::Error;

/// Coarse error taxonomy shared by every stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input has the wrong number of columns or an inconsistent shape.
    Shape,
    /// A parameter or configuration value is invalid.
    Config,
    /// A computation would divide by zero or produce a non-finite value.
    Arithmetic,
}

impl ErrorKind {
    /// Stable lowercase name of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Shape => "shape",
            ErrorKind::Config => "config",
            ErrorKind::Arithmetic => "arithmetic",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core error types for tribar
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input shape error
    #[error("Shape error: {0}")]
    Shape(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Price series contained no values
    #[error("Shape error: price series is empty")]
    EmptySeries,

    /// Price series contained NaN or infinity
    #[error("Shape error: non-finite value {value} at index {index}")]
    NonFinite {
        /// Offending index.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Shape(_) | CoreError::EmptySeries | CoreError::NonFinite { .. } => {
                ErrorKind::Shape
            }
            CoreError::Config(_) | CoreError::Json(_) => ErrorKind::Config,
        }
    }

    /// Creates a `Config` error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        CoreError::Config(msg.into())
    }

    /// Creates a `Shape` error with a message.
    #[must_use]
    pub fn shape(msg: impl Into<String>) -> Self {
        CoreError::Shape(msg.into())
    }
}

//! Pipeline error types.

use thiserror::Error;
use tribar_types::{CoreError, ErrorKind};

/// Errors that can occur while preparing a dataset.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Config parse/validation or price ingestion error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Feature table construction error
    #[error("feature error: {0}")]
    Feature(#[from] tribar_features::FeatureError),

    /// Labeling error
    #[error("label error: {0}")]
    Label(#[from] tribar_labels::LabelError),

    /// Normalization, windowing, split or scaling error
    #[error("preprocess error: {0}")]
    Preprocess(#[from] tribar_preprocess::PreprocessError),

    /// Warm-up and lookahead leave no labeled feature row
    #[error("insufficient data: need {required} prices, have {available}")]
    InsufficientData {
        /// Required number of prices
        required: usize,
        /// Available number of prices
        available: usize,
    },
}

impl PipelineError {
    /// Returns the taxonomy category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Core(err) => err.kind(),
            PipelineError::Feature(err) => err.kind(),
            PipelineError::Label(err) => err.kind(),
            PipelineError::Preprocess(err) => err.kind(),
            PipelineError::InsufficientData { .. } => ErrorKind::Config,
        }
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Returns the error category: `shape`, `config` or `arithmetic`.
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        self.kind().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribar_labels::LabelError;
    use tribar_preprocess::PreprocessError;

    #[test]
    fn test_error_category_config() {
        let err = PipelineError::from(CoreError::config("bad"));
        assert_eq!(err.error_category(), "config");
        assert!(err.is_config_error());

        let err = PipelineError::InsufficientData {
            required: 20,
            available: 8,
        };
        assert_eq!(err.error_category(), "config");
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_error_category_shape() {
        let err = PipelineError::from(CoreError::EmptySeries);
        assert_eq!(err.error_category(), "shape");
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_error_category_arithmetic() {
        let err = PipelineError::from(LabelError::ZeroReferencePrice { index: 2 });
        assert_eq!(err.kind(), ErrorKind::Arithmetic);

        let err = PipelineError::from(PreprocessError::DivisionByZero {
            column: "close".into(),
            time_index: 4,
        });
        assert_eq!(err.error_category(), "arithmetic");
    }
}

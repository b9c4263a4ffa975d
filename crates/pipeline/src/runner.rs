//! Single-call entry point.

use tribar_preprocess::PreparedDataset;
use tribar_types::{PipelineConfig, PriceSeries};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

/// Parses `config_json`, ingests `prices` and prepares the dataset.
///
/// # Errors
/// Returns [`PipelineError::Core`] for malformed or invalid configuration
/// and for an empty or non-finite price series, then any stage error.
pub fn prepare_from_json(
    config_json: &str,
    prices: &[f64],
) -> Result<PreparedDataset, PipelineError> {
    let config = PipelineConfig::from_json(config_json)?;
    let prices = PriceSeries::from_slice(prices)?;

    let mut pipeline = Pipeline::new(config, prices)?;
    pipeline.prepare()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tribar_types::ErrorKind;

    #[test]
    fn test_invalid_json() {
        let err = prepare_from_json("{not json", &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_empty_prices() {
        let err = prepare_from_json("{}", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_unknown_indicator() {
        let json = r#"{"indicators": [{"name": "macd", "period": 3}]}"#;
        let prices: Vec<f64> = (1..=40).map(f64::from).collect();
        let err = prepare_from_json(json, &prices).unwrap_err();
        assert!(matches!(err, PipelineError::Feature(_)));
        assert!(err.is_config_error());
    }
}

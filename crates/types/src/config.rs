//! Pipeline configuration.
//!
//! Every section deserializes with defaults so that `{}` is a complete,
//! valid configuration.

use crate::error::CoreError;

/// Indicator request: registry name plus lookback period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct IndicatorSpec {
    /// Indicator name as registered (e.g. `moving_average`, `rolling_std`).
    pub name: String,
    /// Lookback window length.
    pub period: usize,
}

impl IndicatorSpec {
    /// Creates a new indicator request.
    #[must_use]
    pub fn new(name: impl Into<String>, period: usize) -> Self {
        Self {
            name: name.into(),
            period,
        }
    }

    /// Feature column name, `<name>-<period>`.
    #[must_use]
    pub fn column_name(&self) -> String {
        format!("{}-{}", self.name, self.period)
    }
}

fn default_indicators() -> Vec<IndicatorSpec> {
    vec![
        IndicatorSpec::new("moving_average", 10),
        IndicatorSpec::new("rolling_std", 10),
    ]
}

/// Triple-barrier labeling parameters
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelConfig {
    /// Take-profit distance as a fraction of the reference price
    #[serde(default = "default_profit")]
    pub profit: f64,
    /// Reward-to-risk ratio; the stop distance is `profit / reward_risk`
    #[serde(default = "default_reward_risk")]
    pub reward_risk: f64,
    /// Forward scan length in time steps
    #[serde(default = "default_n_future")]
    pub n_future: usize,
}

fn default_profit() -> f64 {
    0.005
}

fn default_reward_risk() -> f64 {
    2.0
}

fn default_n_future() -> usize {
    5
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            profit: default_profit(),
            reward_risk: default_reward_risk(),
            n_future: default_n_future(),
        }
    }
}

impl LabelConfig {
    /// Checks the parameters that do not depend on the series length.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for a non-positive or non-finite
    /// `profit`/`reward_risk`, or `n_future == 0`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.profit.is_finite() || self.profit <= 0.0 {
            return Err(CoreError::config("labels.profit must be > 0"));
        }
        if !self.reward_risk.is_finite() || self.reward_risk <= 0.0 {
            return Err(CoreError::config("labels.reward_risk must be > 0"));
        }
        if self.n_future == 0 {
            return Err(CoreError::config("labels.n_future must be >= 1"));
        }
        Ok(())
    }
}

/// Standard scaler options
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScalerConfig {
    /// Subtract the per-feature training mean
    #[serde(default = "default_true")]
    pub with_mean: bool,
    /// Divide by the per-feature training standard deviation
    #[serde(default = "default_true")]
    pub with_std: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            with_mean: true,
            with_std: true,
        }
    }
}

/// Windowing, split and scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreprocessConfig {
    /// Rows per window
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Fraction of windows held out as the chronological test suffix
    #[serde(default = "default_test_split")]
    pub test_split: f64,
    /// Scaler options
    #[serde(default)]
    pub scaler: ScalerConfig,
}

fn default_window_size() -> usize {
    5
}

fn default_test_split() -> f64 {
    0.5
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            test_split: default_test_split(),
            scaler: ScalerConfig::default(),
        }
    }
}

impl PreprocessConfig {
    /// Checks window width and split ratio.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] when `window_size == 0` or `test_split`
    /// is outside `[0, 1)`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.window_size == 0 {
            return Err(CoreError::config("preprocess.window_size must be > 0"));
        }
        if !self.test_split.is_finite() || !(0.0..1.0).contains(&self.test_split) {
            return Err(CoreError::config(format!(
                "preprocess.test_split must be in [0, 1), got {}",
                self.test_split
            )));
        }
        Ok(())
    }
}

/// How the trailing steps without a full lookahead are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingLabels {
    /// Drop feature rows whose label would be unresolved
    #[default]
    Exclude,
    /// Keep them and label them nil
    PadNil,
}

/// Complete configuration of one preparation run
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Indicators appended to the price column, in order
    #[serde(default = "default_indicators")]
    pub indicators: Vec<IndicatorSpec>,
    /// Labeling parameters
    #[serde(default)]
    pub labels: LabelConfig,
    /// Preprocessing parameters
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    /// Trailing-row policy
    #[serde(default)]
    pub trailing_labels: TrailingLabels,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            indicators: default_indicators(),
            labels: LabelConfig::default(),
            preprocess: PreprocessConfig::default(),
            trailing_labels: TrailingLabels::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON configuration and validates it.
    ///
    /// # Errors
    /// Returns [`CoreError::Json`] on malformed JSON and any error from
    /// [`PipelineConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for the first invalid value found.
    pub fn validate(&self) -> Result<(), CoreError> {
        for spec in &self.indicators {
            if spec.name.trim().is_empty() {
                return Err(CoreError::config("indicator name is empty"));
            }
            if spec.period == 0 {
                return Err(CoreError::config(format!(
                    "indicator '{}' period must be > 0",
                    spec.name
                )));
            }
        }
        self.labels.validate()?;
        self.preprocess.validate()?;
        Ok(())
    }

    /// Largest requested indicator period, 0 when none is requested.
    #[must_use]
    pub fn max_period(&self) -> usize {
        self.indicators.iter().map(|s| s.period).max().unwrap_or(0)
    }
}

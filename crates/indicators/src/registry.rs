//! Indicator registry for dispatching indicator requests by name.

use crate::error::IndicatorError;
use crate::kind::IndicatorKind;
use crate::traits::Indicator;
use std::collections::HashMap;
use std::sync::Arc;
use tribar_types::IndicatorSpec;

/// Factory function type for creating indicators from a period.
pub type IndicatorFactory =
    Box<dyn Fn(usize) -> Result<Arc<dyn Indicator>, IndicatorError> + Send + Sync>;

/// Registry for indicator factories.
///
/// Maps indicator names to factories. Callers hold a registry explicitly
/// instead of relying on a process-wide lookup table.
pub struct IndicatorRegistry {
    /// Indicator factories by name.
    factories: HashMap<String, IndicatorFactory>,
}

impl IndicatorRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers an indicator factory, replacing any previous entry.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(usize) -> Result<Arc<dyn Indicator>, IndicatorError> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// Registers a built-in kind under `name`.
    pub fn register_kind(&mut self, name: &str, kind: IndicatorKind) {
        self.register(name, move |period| kind.build(period));
    }

    /// Creates an indicator from a specification.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::UnknownIndicator`] if the name is not registered
    /// and any error the factory reports for the period.
    pub fn create(&self, spec: &IndicatorSpec) -> Result<Arc<dyn Indicator>, IndicatorError> {
        let factory = self
            .factories
            .get(&spec.name)
            .ok_or_else(|| IndicatorError::UnknownIndicator(spec.name.clone()))?;
        factory(spec.period)
    }

    /// Checks if an indicator is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns registered indicator names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Creates a registry with the built-in indicators and their short aliases.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for kind in [IndicatorKind::MovingAverage, IndicatorKind::RollingStd] {
            registry.register_kind(kind.name(), kind);
        }
        registry.register_kind("sma", IndicatorKind::MovingAverage);
        registry.register_kind("std", IndicatorKind::RollingStd);

        registry
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for IndicatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impl_::moving_average::MovingAverage;

    #[test]
    fn test_registry_with_defaults() {
        let registry = IndicatorRegistry::with_defaults();

        assert!(registry.contains("moving_average"));
        assert!(registry.contains("rolling_std"));
        assert!(registry.contains("sma"));
        assert!(registry.contains("std"));
        assert!(!registry.contains("UNKNOWN"));
        assert_eq!(
            registry.names(),
            vec!["moving_average", "rolling_std", "sma", "std"]
        );
    }

    #[test]
    fn test_registry_create_moving_average() {
        let registry = IndicatorRegistry::with_defaults();
        let indicator = registry.create(&IndicatorSpec::new("sma", 5)).unwrap();

        assert_eq!(indicator.name(), "moving_average");
        assert_eq!(indicator.warmup_periods(), 5);
    }

    #[test]
    fn test_registry_unknown_indicator() {
        let registry = IndicatorRegistry::with_defaults();
        let result = registry.create(&IndicatorSpec::new("UNKNOWN", 5));

        if let Err(IndicatorError::UnknownIndicator(name)) = result {
            assert_eq!(name, "UNKNOWN");
        } else {
            panic!("Expected UnknownIndicator error");
        }
    }

    #[test]
    fn test_registry_rejects_zero_period() {
        let registry = IndicatorRegistry::with_defaults();
        let result = registry.create(&IndicatorSpec::new("rolling_std", 0));
        assert!(matches!(result, Err(IndicatorError::PeriodOutOfRange { .. })));
    }

    #[test]
    fn test_registry_compute() {
        let registry = IndicatorRegistry::with_defaults();
        let indicator = registry.create(&IndicatorSpec::new("moving_average", 3)).unwrap();
        let result = indicator.compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_registry_custom_indicator() {
        let mut registry = IndicatorRegistry::new();

        registry.register("double_ma", |period| {
            Ok(Arc::new(MovingAverage::new(period * 2)?) as Arc<dyn Indicator>)
        });

        let indicator = registry.create(&IndicatorSpec::new("double_ma", 5)).unwrap();

        // Period is doubled
        assert_eq!(indicator.warmup_periods(), 10);
    }
}

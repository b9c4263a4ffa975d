//! Incremental per-feature standard scaler.

use ndarray::{Array1, Array3, ArrayView2, ArrayView3, Axis, Zip};
use tribar_types::ScalerConfig;

use crate::error::PreprocessError;

/// Per-feature standardizer accumulated one block of rows at a time.
///
/// Statistics are merged with Chan's parallel update, so fitting windows one
/// by one gives the same result as fitting all their rows at once. Variance
/// is the population variance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StandardScaler {
    config: ScalerConfig,
    n_samples: usize,
    mean: Array1<f64>,
    m2: Array1<f64>,
}

impl StandardScaler {
    /// Creates an unfitted scaler for `n_features` features.
    #[must_use]
    pub fn new(n_features: usize, config: ScalerConfig) -> Self {
        Self {
            config,
            n_samples: 0,
            mean: Array1::zeros(n_features),
            m2: Array1::zeros(n_features),
        }
    }

    /// Scaler options.
    #[must_use]
    pub fn config(&self) -> ScalerConfig {
        self.config
    }

    /// Number of features.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Rows seen so far.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Returns true once at least one row was seen.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.n_samples > 0
    }

    /// Running per-feature mean.
    #[must_use]
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Per-feature population variance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> Array1<f64> {
        if self.n_samples == 0 {
            return Array1::zeros(self.n_features());
        }
        let n = self.n_samples as f64;
        self.m2.mapv(|m2| m2 / n)
    }

    /// Per-feature divisor: the standard deviation, or 1 for a constant feature.
    #[must_use]
    pub fn scale(&self) -> Array1<f64> {
        self.variance()
            .mapv(|var| if var > 0.0 { var.sqrt() } else { 1.0 })
    }

    /// Merges a `(rows, features)` block into the running statistics.
    ///
    /// # Errors
    /// - [`PreprocessError::FeatureMismatch`] when the column count differs.
    /// - [`PreprocessError::NonFinite`] when the block holds NaN or infinity.
    #[allow(clippy::cast_precision_loss)]
    pub fn partial_fit(&mut self, rows: ArrayView2<'_, f64>) -> Result<(), PreprocessError> {
        self.check_features(rows.ncols())?;
        if rows.iter().any(|v| !v.is_finite()) {
            return Err(PreprocessError::NonFinite(
                "scaler input contains NaN or infinity".to_string(),
            ));
        }
        let n_b = rows.nrows();
        if n_b == 0 {
            return Ok(());
        }

        let nb = n_b as f64;
        let mean_b = rows.sum_axis(Axis(0)) / nb;
        let mut m2_b = Array1::<f64>::zeros(self.n_features());
        for row in rows.axis_iter(Axis(0)) {
            Zip::from(&mut m2_b)
                .and(&row)
                .and(&mean_b)
                .for_each(|acc, &x, &mu| *acc += (x - mu) * (x - mu));
        }

        let na = self.n_samples as f64;
        let n = na + nb;
        Zip::from(&mut self.mean)
            .and(&mut self.m2)
            .and(&mean_b)
            .and(&m2_b)
            .for_each(|mean, m2, &mu_b, &m2_b| {
                let delta = mu_b - *mean;
                *mean += delta * nb / n;
                *m2 += m2_b + delta * delta * na * nb / n;
            });
        self.n_samples += n_b;
        Ok(())
    }

    /// Fits every window of a `(batches, window, features)` tensor, one
    /// window per [`StandardScaler::partial_fit`] call.
    ///
    /// # Errors
    /// Same as [`StandardScaler::partial_fit`].
    pub fn fit_windows(&mut self, windows: ArrayView3<'_, f64>) -> Result<(), PreprocessError> {
        for window in windows.outer_iter() {
            self.partial_fit(window)?;
        }
        Ok(())
    }

    /// Returns a standardized copy of a `(batches, window, features)` tensor.
    ///
    /// # Errors
    /// - [`PreprocessError::NotFitted`] before any row was seen.
    /// - [`PreprocessError::FeatureMismatch`] when the feature count differs.
    pub fn transform(&self, windows: ArrayView3<'_, f64>) -> Result<Array3<f64>, PreprocessError> {
        if !self.is_fitted() {
            return Err(PreprocessError::NotFitted);
        }
        self.check_features(windows.dim().2)?;

        let scale = self.scale();
        let mut out = windows.to_owned();
        for mut row in out.lanes_mut(Axis(2)) {
            Zip::from(&mut row)
                .and(&self.mean)
                .and(&scale)
                .for_each(|x, &mu, &sigma| {
                    if self.config.with_mean {
                        *x -= mu;
                    }
                    if self.config.with_std {
                        *x /= sigma;
                    }
                });
        }
        Ok(out)
    }

    fn check_features(&self, actual: usize) -> Result<(), PreprocessError> {
        if actual == self.n_features() {
            Ok(())
        } else {
            Err(PreprocessError::FeatureMismatch {
                expected: self.n_features(),
                actual,
            })
        }
    }
}

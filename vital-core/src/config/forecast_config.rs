use serde::{Deserialize, Serialize};

use super::defaults;

/// Forecast module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Horizons (days ahead) to forecast at.
    pub horizons: Vec<u32>,
    /// z multiplier for the prediction interval half-width.
    pub interval_z: f64,
    /// Reconciliation acceptance band as a multiple of the metric's
    /// historical residual standard deviation.
    pub accuracy_band_sigma: f64,
    /// Absolute floor for the acceptance band, for metrics whose history
    /// is too flat to produce a meaningful sigma.
    pub min_accuracy_band: f64,
    /// Minimum observed days required to fit a trend at all.
    pub min_fit_points: usize,
    /// Half-life (days) of the recency weighting applied to the fit.
    pub recency_half_life_days: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizons: defaults::DEFAULT_HORIZONS.to_vec(),
            interval_z: defaults::DEFAULT_INTERVAL_Z,
            accuracy_band_sigma: defaults::DEFAULT_ACCURACY_BAND_SIGMA,
            min_accuracy_band: defaults::DEFAULT_MIN_ACCURACY_BAND,
            min_fit_points: defaults::DEFAULT_MIN_FIT_POINTS,
            recency_half_life_days: defaults::DEFAULT_RECENCY_HALF_LIFE_DAYS,
        }
    }
}

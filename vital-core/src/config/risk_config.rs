use serde::{Deserialize, Serialize};

use super::defaults;

/// Risk aggregator configuration.
///
/// Cut points map the continuous score to the discrete level:
/// score < moderate_cut → Low, < high_cut → Moderate, < critical_cut →
/// High, otherwise Critical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub moderate_cut: f64,
    pub high_cut: f64,
    pub critical_cut: f64,
    /// Component weights. Normalized at use so they need not sum to 1.
    pub trend_weight: f64,
    pub trigger_weight: f64,
    pub forecast_weight: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            moderate_cut: defaults::DEFAULT_MODERATE_CUT,
            high_cut: defaults::DEFAULT_HIGH_CUT,
            critical_cut: defaults::DEFAULT_CRITICAL_CUT,
            trend_weight: defaults::DEFAULT_TREND_WEIGHT,
            trigger_weight: defaults::DEFAULT_TRIGGER_WEIGHT,
            forecast_weight: defaults::DEFAULT_FORECAST_WEIGHT,
        }
    }
}

//! Engine configuration. Every load-bearing numeric threshold is exposed
//! here rather than hard-coded; the values in `defaults` are starting
//! points, not invariants.

mod align_config;
mod cache_config;
mod correlation_config;
pub mod defaults;
mod forecast_config;
mod risk_config;
mod trigger_config;

pub use align_config::AlignConfig;
pub use cache_config::CacheConfig;
pub use correlation_config::CorrelationConfig;
pub use forecast_config::ForecastConfig;
pub use risk_config::RiskConfig;
pub use trigger_config::TriggerConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{VitalError, VitalResult};

/// Root configuration for the whole engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalConfig {
    pub align: AlignConfig,
    pub correlation: CorrelationConfig,
    pub trigger: TriggerConfig,
    pub forecast: ForecastConfig,
    pub risk: RiskConfig,
    pub cache: CacheConfig,
}

impl VitalConfig {
    /// Parse from a TOML string. Missing sections fall back to defaults.
    pub fn from_toml_str(s: &str) -> VitalResult<Self> {
        toml::from_str(s).map_err(|e| VitalError::Config {
            reason: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: &std::path::Path) -> VitalResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| VitalError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }
}

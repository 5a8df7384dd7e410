use serde::{Deserialize, Serialize};

use super::defaults;

/// Correlation engine configuration.
///
/// The magnitude cut points are load-bearing for user-facing severity
/// language: |r| < moderate_threshold → small, up to large_threshold →
/// moderate, above → large.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Minimum paired non-missing days required to produce a result.
    /// Below this the outcome is "insufficient data" (no result), which is
    /// distinct from a zero-coefficient result.
    pub min_sample_size: usize,
    /// Candidate lags are 0..=max_lag_days.
    pub max_lag_days: u32,
    /// |coefficient| below this classifies as Neutral.
    pub neutral_epsilon: f64,
    /// |coefficient| at or above this is at least Moderate.
    pub moderate_threshold: f64,
    /// |coefficient| above this is Large.
    pub large_threshold: f64,
    /// TTL applied to stored correlation results.
    pub result_ttl_secs: u64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            min_sample_size: defaults::DEFAULT_MIN_SAMPLE_SIZE,
            max_lag_days: defaults::DEFAULT_MAX_LAG_DAYS,
            neutral_epsilon: defaults::DEFAULT_NEUTRAL_EPSILON,
            moderate_threshold: defaults::DEFAULT_MODERATE_THRESHOLD,
            large_threshold: defaults::DEFAULT_LARGE_THRESHOLD,
            result_ttl_secs: defaults::DEFAULT_RESULT_TTL_SECS,
        }
    }
}

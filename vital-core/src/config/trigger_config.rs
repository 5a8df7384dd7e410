use serde::{Deserialize, Serialize};

use super::defaults;

/// Trigger pattern detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// p-value ceiling for trigger eligibility. This is the stricter gate
    /// the detector applies on top of raw pairwise scan output.
    pub significance_level: f64,
    /// Minimum paired sample size for eligibility.
    pub min_sample_size: usize,
    /// EWMA weight given to the newest observation when refreshing
    /// pattern_strength and trigger_threshold. Recent evidence counts more
    /// than old, but a single measurement never overwrites history.
    pub recency_weight: f64,
    /// Confidence boost applied on explicit user confirmation.
    pub confirm_boost: f64,
    /// Confidence penalty applied on explicit user rejection.
    pub reject_penalty: f64,
    /// Confidence never drops below this from feedback alone — one
    /// rejection must not zero a pattern.
    pub min_confidence_floor: f64,
    /// Consecutive analysis cycles without re-observation before a pattern
    /// is deactivated (retained, never deleted).
    pub max_missed_cycles: u32,
    /// times_observed at which the observation factor saturates.
    pub observations_for_full_confidence: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            significance_level: defaults::DEFAULT_SIGNIFICANCE_LEVEL,
            min_sample_size: defaults::DEFAULT_MIN_SAMPLE_SIZE,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            confirm_boost: defaults::DEFAULT_CONFIRM_BOOST,
            reject_penalty: defaults::DEFAULT_REJECT_PENALTY,
            min_confidence_floor: defaults::DEFAULT_MIN_CONFIDENCE_FLOOR,
            max_missed_cycles: defaults::DEFAULT_MAX_MISSED_CYCLES,
            observations_for_full_confidence: defaults::DEFAULT_OBSERVATIONS_FOR_FULL_CONFIDENCE,
        }
    }
}

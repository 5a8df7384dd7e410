use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sign classification of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Positive,
    Negative,
    /// |coefficient| below the neutral epsilon.
    Neutral,
}

/// Magnitude classification on |coefficient|. Ordered: Small < Moderate < Large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Small,
    Moderate,
    Large,
}

/// Logical identity of a correlation result. Recomputation for the same key
/// replaces the prior row — there is never more than one row per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationKey {
    pub user_id: String,
    /// Predictor variable (shifted earlier in time at positive lags).
    pub variable_a: String,
    /// Outcome variable.
    pub variable_b: String,
    pub lag_days: u32,
    pub analysis_period_days: u32,
}

/// One pairwise lagged correlation between two variables for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub id: String,
    pub key: CorrelationKey,
    /// Pearson coefficient in [-1, 1].
    pub coefficient: f64,
    /// Two-tailed p-value in [0, 1].
    pub p_value: f64,
    /// Number of paired non-missing days after the lag shift.
    pub sample_size: usize,
    pub effect_type: EffectType,
    pub effect_magnitude: EffectMagnitude,
    pub computed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CorrelationResult {
    /// Whether this result has passed its advisory expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DateWindow, Score};

/// Discrete risk bands mapped from the continuous score by fixed cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

/// Risk category an assessment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Near-term flare risk for one symptom type.
    SymptomFlare,
    /// Sustained decline of a tracked biometric.
    BiometricDecline,
    /// Medication adherence slipping.
    AdherenceLapse,
    /// Roll-up across all categories.
    Overall,
}

/// What kind of record a contributing factor points back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Correlation,
    TriggerPattern,
    Forecast,
    Trend,
}

/// An auditable reference from a risk assessment back to the record that
/// contributed to it. Opaque scores are not acceptable — every assessment
/// must be explainable from its factors alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub kind: FactorKind,
    /// Id of the producing CorrelationResult / TriggerPattern / Prediction,
    /// or the metric name for trend factors.
    pub reference_id: String,
    pub description: String,
    /// This factor's share of the final score, in [0, 1].
    pub weight: f64,
}

/// A point-in-time risk assessment. Superseded assessments are deactivated,
/// never mutated, so history is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: String,
    pub user_id: String,
    pub category: RiskCategory,
    /// Discriminator within the category, e.g. the symptom type or metric.
    pub risk_type: String,
    pub risk_score: Score,
    pub risk_level: RiskLevel,
    pub risk_window: DateWindow,
    pub contributing_factors: Vec<ContributingFactor>,
    pub is_active: bool,
    pub assessed_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnalysisScope, CorrelationResult, Prediction, RiskAssessment, TriggerPattern};

/// The bundled output of one full pipeline run for a scope.
///
/// This is what the cache stores and what downstream consumers (report
/// layer, dashboards) read. Every record carries enough structure that a
/// consumer can render plain-language explanations without re-deriving
/// statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub scope: AnalysisScope,
    pub correlations: Vec<CorrelationResult>,
    pub patterns: Vec<TriggerPattern>,
    pub predictions: Vec<Prediction>,
    pub risks: Vec<RiskAssessment>,
    /// True when one or more variables were excluded by source failures.
    pub partial: bool,
    /// Variables excluded from this run (source failure, unknown family).
    pub excluded_variables: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

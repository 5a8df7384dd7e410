use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Score;

/// What kind of forecast a prediction row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionType {
    /// Point forecast of a tracked metric's value.
    MetricForecast,
    /// Probability-style forecast of a symptom flare.
    SymptomRisk,
}

/// Lifecycle of a prediction. Pending → Confirmed/Inaccurate is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Pending,
    Confirmed,
    Inaccurate,
}

/// Forecast interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRange {
    pub lower: f64,
    pub upper: f64,
}

/// A forecast made at `created_at` for `metric` on `prediction_date`,
/// reconciled against the observed actual once the date has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub user_id: String,
    pub prediction_type: PredictionType,
    pub metric: String,
    pub prediction_date: NaiveDate,
    pub horizon_days: u32,
    pub predicted_value: f64,
    pub confidence: Score,
    pub range: PredictionRange,
    pub actual_value: Option<f64>,
    pub prediction_error: Option<f64>,
    pub status: PredictionStatus,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    /// Whether reconciliation may act on this prediction.
    pub fn is_pending(&self) -> bool {
        self.status == PredictionStatus::Pending
    }
}

use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::StoreError;
use crate::models::{CorrelationResult, Prediction, RiskAssessment, TriggerPattern};

/// Durable store for the four result families.
pub trait IResultStore: Send + Sync {
    // --- Correlations ---

    /// Insert or replace the row for the result's logical key
    /// `(user_id, variable_a, variable_b, lag_days, analysis_period_days)`.
    /// Recomputation replaces rather than appends.
    fn upsert_correlation(&self, result: &CorrelationResult) -> Result<(), StoreError>;

    /// All stored correlations for a user at a given analysis period.
    fn correlations_for(
        &self,
        user_id: &str,
        analysis_period_days: u32,
    ) -> Result<Vec<CorrelationResult>, StoreError>;

    /// Delete correlations whose `expires_at` has passed. Returns the count.
    fn purge_expired_correlations(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;

    // --- Trigger patterns ---

    fn upsert_pattern(&self, pattern: &TriggerPattern) -> Result<(), StoreError>;
    fn get_pattern(&self, id: &str) -> Result<Option<TriggerPattern>, StoreError>;
    /// All patterns for a user, active and deactivated (history is kept).
    fn patterns_for(&self, user_id: &str) -> Result<Vec<TriggerPattern>, StoreError>;

    // --- Predictions ---

    fn insert_prediction(&self, prediction: &Prediction) -> Result<(), StoreError>;
    /// Pending predictions whose prediction_date is on or before `as_of`.
    fn due_predictions(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Prediction>, StoreError>;
    /// Write back a reconciled prediction.
    fn update_prediction(&self, prediction: &Prediction) -> Result<(), StoreError>;

    // --- Risk assessments ---

    /// Insert a new assessment, deactivating any prior active row for the
    /// same (user_id, category, risk_type) in the same transaction.
    fn upsert_risk(&self, assessment: &RiskAssessment) -> Result<(), StoreError>;
    fn active_risks(&self, user_id: &str) -> Result<Vec<RiskAssessment>, StoreError>;
}

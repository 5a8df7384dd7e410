//! Model types for the vital engine: raw observations, aligned series,
//! correlation results, trigger patterns, predictions, risk assessments,
//! cache entries, and the source-record shapes consumed from collaborators.

mod aligned_series;
mod cache;
mod correlation;
mod observation;
mod prediction;
mod risk;
mod scope;
mod score;
mod snapshot;
mod sources;
mod trigger;

pub use aligned_series::AlignedSeries;
pub use cache::{CacheEntry, CacheStatus};
pub use correlation::{CorrelationKey, CorrelationResult, EffectMagnitude, EffectType};
pub use observation::{
    local_day, symptom_type_of, DailyReduction, DataSource, Observation, VariableFamily,
};
pub use prediction::{Prediction, PredictionRange, PredictionStatus, PredictionType};
pub use risk::{ContributingFactor, FactorKind, RiskAssessment, RiskCategory, RiskLevel};
pub use scope::{AnalysisScope, DateWindow};
pub use score::Score;
pub use snapshot::AnalysisSnapshot;
pub use sources::{
    LabResult, MedicationAdherenceEntry, NutritionEntry, SymptomJournalEntry,
    WearableDailySummary,
};
pub use trigger::{PatternType, TriggerPattern, TriggerVariable};

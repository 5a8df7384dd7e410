//! In-memory `ISeriesStore` over raw observations.
//!
//! Reference adapter and test double for the external series sources.
//! Ingestion accepts each source-record shape and stores its namespaced
//! observation; variables can be marked unavailable to exercise the
//! partial-result degradation path.

use chrono::NaiveDate;
use dashmap::{DashMap, DashSet};

use vital_core::models::{
    local_day, DailyReduction, LabResult, MedicationAdherenceEntry, NutritionEntry, Observation,
    SymptomJournalEntry, VariableFamily, WearableDailySummary,
};
use vital_core::traits::ISeriesStore;
use vital_core::{DateWindow, StoreError};

#[derive(Default)]
pub struct MemorySeriesStore {
    observations: DashMap<(String, String), Vec<Observation>>,
    unavailable: DashSet<String>,
    /// Fixed UTC offset for day-boundary filtering. Must match the
    /// aligner's `utc_offset_minutes` or window edges disagree on which
    /// day an observation belongs to.
    utc_offset_minutes: i32,
}

impl MemorySeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose day boundaries follow a fixed UTC offset in minutes.
    pub fn with_offset(utc_offset_minutes: i32) -> Self {
        Self {
            utc_offset_minutes,
            ..Self::default()
        }
    }

    pub fn push(&self, observation: Observation) {
        let key = (observation.user_id.clone(), observation.variable.clone());
        self.observations.entry(key).or_default().push(observation);
    }

    pub fn ingest_nutrition(&self, entry: &NutritionEntry) {
        self.push(entry.observation());
    }

    pub fn ingest_wearable(&self, summary: &WearableDailySummary) {
        self.push(summary.observation());
    }

    pub fn ingest_symptom(&self, entry: &SymptomJournalEntry) {
        self.push(entry.observation());
    }

    pub fn ingest_adherence(&self, entry: &MedicationAdherenceEntry) {
        self.push(entry.observation());
    }

    pub fn ingest_lab(&self, result: &LabResult) {
        self.push(result.observation());
    }

    /// Make fetches for a variable fail with `StoreError::Unavailable`,
    /// simulating a source outage.
    pub fn mark_unavailable(&self, variable: &str) {
        self.unavailable.insert(variable.to_string());
    }

    pub fn mark_available(&self, variable: &str) {
        self.unavailable.remove(variable);
    }

    fn check_available(&self, variable: &str) -> Result<(), StoreError> {
        if self.unavailable.contains(variable) {
            return Err(StoreError::Unavailable {
                source_name: variable.to_string(),
                reason: "source marked unavailable".to_string(),
            });
        }
        Ok(())
    }
}

fn reduce(values: &[f64], policy: DailyReduction) -> f64 {
    match policy {
        DailyReduction::Sum => values.iter().sum(),
        DailyReduction::Mean => values.iter().sum::<f64>() / values.len() as f64,
        DailyReduction::Max => values.iter().copied().fold(f64::MIN, f64::max),
    }
}

impl ISeriesStore for MemorySeriesStore {
    fn variables_for(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let mut variables: Vec<String> = self
            .observations
            .iter()
            .filter(|entry| entry.key().0 == user_id)
            .map(|entry| entry.key().1.clone())
            .collect();
        variables.sort_unstable();
        variables.dedup();
        Ok(variables)
    }

    fn fetch_series(
        &self,
        user_id: &str,
        variable: &str,
        window: DateWindow,
    ) -> Result<Vec<Observation>, StoreError> {
        self.check_available(variable)?;
        let key = (user_id.to_string(), variable.to_string());
        let Some(entry) = self.observations.get(&key) else {
            return Ok(Vec::new());
        };
        Ok(entry
            .iter()
            .filter(|obs| {
                window
                    .index_of(local_day(obs.timestamp, self.utc_offset_minutes))
                    .is_some()
            })
            .cloned()
            .collect())
    }

    fn observed_value(
        &self,
        user_id: &str,
        variable: &str,
        day: NaiveDate,
    ) -> Result<Option<f64>, StoreError> {
        self.check_available(variable)?;
        let Some(family) = VariableFamily::of_variable(variable) else {
            return Ok(None);
        };
        let key = (user_id.to_string(), variable.to_string());
        let Some(entry) = self.observations.get(&key) else {
            return Ok(None);
        };
        let values: Vec<f64> = entry
            .iter()
            .filter(|obs| local_day(obs.timestamp, self.utc_offset_minutes) == day)
            .map(|obs| obs.value)
            .collect();
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(reduce(&values, family.daily_reduction())))
    }
}

//! Source-record shapes consumed from external collaborators, and their
//! mapping into namespaced observations. All read-only from the engine's
//! perspective.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{DataSource, Observation};

fn midday_utc(date: NaiveDate) -> DateTime<Utc> {
    // Date-keyed sources have no intra-day time; noon keeps the observation
    // inside the same local day for any sane UTC offset.
    date.and_time(chrono::NaiveTime::MIN).and_utc() + chrono::Duration::hours(12)
}

/// One logged nutrient quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionEntry {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub nutrient_name: String,
    pub value: f64,
    pub unit: String,
}

impl NutritionEntry {
    pub fn observation(&self) -> Observation {
        Observation {
            user_id: self.user_id.clone(),
            variable: format!("nutrition.{}", self.nutrient_name),
            timestamp: self.timestamp,
            value: self.value,
            unit: Some(self.unit.clone()),
            source: DataSource::Nutrition,
        }
    }
}

/// One wearable daily-summary metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableDailySummary {
    pub user_id: String,
    pub date: NaiveDate,
    pub metric_name: String,
    pub value: f64,
}

impl WearableDailySummary {
    pub fn observation(&self) -> Observation {
        Observation {
            user_id: self.user_id.clone(),
            variable: format!("wearable.{}", self.metric_name),
            timestamp: midday_utc(self.date),
            value: self.value,
            unit: None,
            source: DataSource::Wearable,
        }
    }
}

/// One symptom journal entry with 1-10 severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomJournalEntry {
    pub user_id: String,
    pub date: NaiveDate,
    pub symptom_type: String,
    pub severity: u8,
    pub triggers: Vec<String>,
    pub associated_symptoms: Vec<String>,
}

impl SymptomJournalEntry {
    pub fn observation(&self) -> Observation {
        Observation {
            user_id: self.user_id.clone(),
            variable: format!("symptom.{}.severity", self.symptom_type),
            timestamp: midday_utc(self.date),
            value: f64::from(self.severity.min(10)),
            unit: None,
            source: DataSource::SymptomJournal,
        }
    }
}

/// One scheduled medication dose and whether it was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationAdherenceEntry {
    pub user_id: String,
    pub medication_name: String,
    pub scheduled_time: DateTime<Utc>,
    pub taken_time: Option<DateTime<Utc>>,
    pub was_taken: bool,
}

impl MedicationAdherenceEntry {
    /// Adherence maps to a 0/1 taken series; daily Sum yields doses taken.
    pub fn observation(&self) -> Observation {
        Observation {
            user_id: self.user_id.clone(),
            variable: format!("medication.{}.taken", self.medication_name),
            timestamp: self.taken_time.unwrap_or(self.scheduled_time),
            value: if self.was_taken { 1.0 } else { 0.0 },
            unit: None,
            source: DataSource::MedicationLog,
        }
    }
}

/// One lab biomarker result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    pub user_id: String,
    pub test_date: NaiveDate,
    pub biomarker_name: String,
    pub value: f64,
    pub unit: String,
    pub reference_range: Option<(f64, f64)>,
}

impl LabResult {
    pub fn observation(&self) -> Observation {
        Observation {
            user_id: self.user_id.clone(),
            variable: format!("lab.{}", self.biomarker_name),
            timestamp: midday_utc(self.test_date),
            value: self.value,
            unit: Some(self.unit.clone()),
            source: DataSource::LabImport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VariableFamily;

    #[test]
    fn records_namespace_into_known_families() {
        let n = NutritionEntry {
            user_id: "u".into(),
            timestamp: Utc::now(),
            nutrient_name: "total_sugar_g".into(),
            value: 80.0,
            unit: "g".into(),
        };
        assert_eq!(
            VariableFamily::of_variable(&n.observation().variable),
            Some(VariableFamily::Nutrition)
        );

        let m = MedicationAdherenceEntry {
            user_id: "u".into(),
            medication_name: "metformin".into(),
            scheduled_time: Utc::now(),
            taken_time: None,
            was_taken: false,
        };
        let obs = m.observation();
        assert_eq!(obs.variable, "medication.metformin.taken");
        assert_eq!(obs.value, 0.0);
    }
}

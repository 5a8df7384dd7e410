use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants;

/// The user-local calendar day an instant falls on, given a fixed UTC
/// offset in minutes. Every consumer that buckets or filters observations
/// by day must go through this, so alignment and stores agree on day
/// boundaries.
pub fn local_day(timestamp: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDate {
    (timestamp + Duration::minutes(i64::from(utc_offset_minutes))).date_naive()
}

/// Which external collaborator produced an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Nutrition,
    Wearable,
    SymptomJournal,
    MedicationLog,
    LabImport,
}

/// How multiple same-day observations of one variable collapse into a
/// single daily value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyReduction {
    /// Counts and doses accumulate (nutrients, medication taken).
    Sum,
    /// Continuous vitals and biomarkers average.
    Mean,
    /// Severity scales keep the worst reading of the day.
    Max,
}

/// Variable family, derived from the namespace prefix of a variable name
/// (e.g. `nutrition.total_sugar_g` → Nutrition). Each family carries its
/// daily reduction policy, so aggregation is never inferred per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableFamily {
    Nutrition,
    Wearable,
    Symptom,
    Medication,
    Lab,
}

impl VariableFamily {
    /// Parse the family from a namespaced variable name.
    /// Returns None for unknown prefixes — callers exclude those variables
    /// rather than guessing a policy.
    pub fn of_variable(variable: &str) -> Option<Self> {
        let prefix = variable.split('.').next()?;
        match prefix {
            constants::PREFIX_NUTRITION => Some(Self::Nutrition),
            constants::PREFIX_WEARABLE => Some(Self::Wearable),
            constants::PREFIX_SYMPTOM => Some(Self::Symptom),
            constants::PREFIX_MEDICATION => Some(Self::Medication),
            constants::PREFIX_LAB => Some(Self::Lab),
            _ => None,
        }
    }

    /// Daily reduction policy for this family.
    pub fn daily_reduction(self) -> DailyReduction {
        match self {
            Self::Nutrition | Self::Medication => DailyReduction::Sum,
            Self::Wearable | Self::Lab => DailyReduction::Mean,
            Self::Symptom => DailyReduction::Max,
        }
    }
}

/// Extract the symptom type from a symptom variable name.
/// `symptom.migraine.severity` → `migraine`. None for non-symptom variables.
pub fn symptom_type_of(variable: &str) -> Option<&str> {
    let mut parts = variable.split('.');
    if parts.next()? != constants::PREFIX_SYMPTOM {
        return None;
    }
    parts.next()
}

/// A single immutable observation from an external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub user_id: String,
    /// Namespaced variable name, e.g. `nutrition.total_sugar_g`.
    pub variable: String,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub unit: Option<String>,
    pub source: DataSource,
}

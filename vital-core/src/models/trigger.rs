use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Score, VariableFamily};

/// Category of a trigger hypothesis, derived from the predictor variable's
/// family (or MultiFactor for conjunctions across families).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    FoodTrigger,
    BiometricTrigger,
    MedicationSideEffect,
    BiomarkerTrigger,
    MultiFactor,
}

impl PatternType {
    /// Single-variable pattern type for a predictor family.
    /// Symptom predictors have no single-variable pattern type — symptom/
    /// symptom pairs only contribute to MultiFactor conjunctions.
    pub fn for_family(family: VariableFamily) -> Option<Self> {
        match family {
            VariableFamily::Nutrition => Some(Self::FoodTrigger),
            VariableFamily::Wearable => Some(Self::BiometricTrigger),
            VariableFamily::Medication => Some(Self::MedicationSideEffect),
            VariableFamily::Lab => Some(Self::BiomarkerTrigger),
            VariableFamily::Symptom => None,
        }
    }
}

/// One contributing variable within a trigger pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerVariable {
    pub variable: String,
    pub coefficient: f64,
    pub p_value: f64,
}

/// A validated-or-forming hypothesis that one or more variables precede a
/// symptom. Counters only grow; patterns deactivate rather than delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerPattern {
    pub id: String,
    pub user_id: String,
    /// e.g. `migraine` (the middle segment of `symptom.migraine.severity`).
    pub symptom_type: String,
    pub pattern_type: PatternType,
    pub trigger_variables: Vec<TriggerVariable>,
    pub pattern_strength: Score,
    pub confidence: Score,
    /// Predictor value above which the trigger historically fires.
    pub trigger_threshold: f64,
    pub times_observed: u32,
    pub times_validated: u32,
    pub last_observed_at: DateTime<Utc>,
    pub is_active: bool,
    pub user_acknowledged: bool,
    /// Consecutive analysis cycles without re-observation.
    pub missed_cycles: u32,
    pub created_at: DateTime<Utc>,
}

impl TriggerPattern {
    /// Sorted variable names — the set component of the match key.
    pub fn variable_set(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .trigger_variables
            .iter()
            .map(|v| v.variable.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Whether a candidate with the given identity matches this pattern.
    pub fn matches(
        &self,
        symptom_type: &str,
        pattern_type: PatternType,
        variables: &[&str],
    ) -> bool {
        if self.symptom_type != symptom_type || self.pattern_type != pattern_type {
            return false;
        }
        let mut candidate: Vec<&str> = variables.to_vec();
        candidate.sort_unstable();
        self.variable_set() == candidate
    }
}

//! DetectorEngine — groups eligible correlations by symptom, forms
//! single-variable and multi-factor candidates, matches them against
//! existing patterns, and sweeps patterns that stopped recurring.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use vital_core::config::TriggerConfig;
use vital_core::models::{
    symptom_type_of, AlignedSeries, CorrelationResult, PatternType, Score, TriggerPattern,
    TriggerVariable, VariableFamily,
};

use crate::eligibility::is_trigger_eligible;
use crate::reducer::{observe, sweep_missed, CandidateObservation};

/// Result of one detection cycle: every pattern row that changed and must
/// be upserted (newly created, re-observed, or swept).
#[derive(Debug, Clone)]
pub struct DetectionOutcome {
    pub patterns: Vec<TriggerPattern>,
}

pub struct DetectorEngine {
    config: TriggerConfig,
}

impl DetectorEngine {
    pub fn new(config: TriggerConfig) -> Self {
        Self { config }
    }

    /// Run one detection cycle over the current window's correlations.
    ///
    /// `series` supplies predictor statistics for trigger thresholds;
    /// `existing` is the user's full pattern set (active and inactive).
    pub fn detect(
        &self,
        series: &[AlignedSeries],
        correlations: &[CorrelationResult],
        existing: &[TriggerPattern],
        now: DateTime<Utc>,
    ) -> DetectionOutcome {
        let candidates = self.build_candidates(series, correlations);

        let mut updated: Vec<TriggerPattern> = Vec::new();
        let mut observed_ids: HashSet<String> = HashSet::new();

        for candidate in &candidates {
            let variables: Vec<&str> = candidate
                .trigger_variables
                .iter()
                .map(|v| v.variable.as_str())
                .collect();
            let matched = existing.iter().find(|p| {
                p.matches(&candidate.symptom_type, candidate.pattern_type, &variables)
            });
            if let Some(p) = matched {
                observed_ids.insert(p.id.clone());
            }
            let next = observe(matched, candidate, now, &self.config);
            tracing::debug!(
                symptom = %next.symptom_type,
                pattern_type = ?next.pattern_type,
                times_observed = next.times_observed,
                "pattern observed"
            );
            updated.push(next);
        }

        // Active patterns not re-observed this cycle accrue a miss.
        for pattern in existing {
            if pattern.is_active && !observed_ids.contains(&pattern.id) {
                let swept = sweep_missed(pattern, &self.config);
                if !swept.is_active {
                    tracing::info!(
                        pattern_id = %swept.id,
                        symptom = %swept.symptom_type,
                        "pattern deactivated after missed cycles"
                    );
                }
                updated.push(swept);
            }
        }

        DetectionOutcome { patterns: updated }
    }

    /// Build candidate observations from eligible correlations.
    ///
    /// Per symptom: the strongest eligible correlation per predictor
    /// variable becomes a single-variable candidate; predictors spanning
    /// ≥ 2 families additionally form one multi-factor candidate.
    fn build_candidates(
        &self,
        series: &[AlignedSeries],
        correlations: &[CorrelationResult],
    ) -> Vec<CandidateObservation> {
        // Strongest eligible correlation per (symptom, predictor).
        let mut best: BTreeMap<(String, String), &CorrelationResult> = BTreeMap::new();
        for result in correlations {
            if !is_trigger_eligible(result, &self.config) {
                continue;
            }
            let Some(symptom) = symptom_type_of(&result.key.variable_b) else {
                continue;
            };
            let key = (symptom.to_string(), result.key.variable_a.clone());
            match best.get(&key) {
                Some(prev) if prev.coefficient.abs() >= result.coefficient.abs() => {}
                _ => {
                    best.insert(key, result);
                }
            }
        }

        let mut by_symptom: BTreeMap<&str, Vec<&CorrelationResult>> = BTreeMap::new();
        for ((symptom, _), result) in &best {
            by_symptom.entry(symptom.as_str()).or_default().push(*result);
        }

        let mut candidates = Vec::new();
        for (symptom, results) in by_symptom {
            let user_id = results[0].key.user_id.clone();
            let mut families: HashSet<VariableFamily> = HashSet::new();
            let mut contributors: Vec<(TriggerVariable, f64)> = Vec::new();

            for result in &results {
                let variable = &result.key.variable_a;
                let Some(family) = VariableFamily::of_variable(variable) else {
                    continue;
                };
                let threshold = predictor_threshold(series, variable);
                let trigger_variable = TriggerVariable {
                    variable: variable.clone(),
                    coefficient: result.coefficient,
                    p_value: result.p_value,
                };

                if let Some(pattern_type) = PatternType::for_family(family) {
                    candidates.push(CandidateObservation {
                        user_id: user_id.clone(),
                        symptom_type: symptom.to_string(),
                        pattern_type,
                        trigger_variables: vec![trigger_variable.clone()],
                        strength: Score::new(result.coefficient.abs()),
                        trigger_threshold: threshold,
                    });
                }
                families.insert(family);
                contributors.push((trigger_variable, threshold));
            }

            if families.len() >= 2 {
                let strength = contributors
                    .iter()
                    .map(|(v, _)| v.coefficient.abs())
                    .sum::<f64>()
                    / contributors.len() as f64;
                let threshold = contributors.iter().map(|(_, t)| t).sum::<f64>()
                    / contributors.len() as f64;
                candidates.push(CandidateObservation {
                    user_id,
                    symptom_type: symptom.to_string(),
                    pattern_type: PatternType::MultiFactor,
                    trigger_variables: contributors.into_iter().map(|(v, _)| v).collect(),
                    strength: Score::new(strength),
                    trigger_threshold: threshold,
                });
            }
        }
        candidates
    }
}

/// Trigger threshold for a predictor: mean + 0.5·std of its observed
/// values this window. 0.0 when the series is absent or empty.
fn predictor_threshold(series: &[AlignedSeries], variable: &str) -> f64 {
    series
        .iter()
        .find(|s| s.variable == variable)
        .and_then(|s| Some(s.mean()? + 0.5 * s.std_dev()?))
        .unwrap_or(0.0)
}

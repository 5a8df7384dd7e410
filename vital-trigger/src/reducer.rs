//! Pure reducers for trigger pattern state.
//!
//! `observe` folds new correlated evidence into a pattern (or creates one),
//! `apply_feedback` folds explicit user confirmation/rejection, and
//! `sweep_missed` handles deactivation. Counters only ever grow; a single
//! data point never flips a pattern's state abruptly.

use chrono::{DateTime, Utc};

use vital_core::config::TriggerConfig;
use vital_core::models::{PatternType, Score, TriggerPattern, TriggerVariable};

/// One detection cycle's evidence for a candidate pattern.
#[derive(Debug, Clone)]
pub struct CandidateObservation {
    pub user_id: String,
    pub symptom_type: String,
    pub pattern_type: PatternType,
    pub trigger_variables: Vec<TriggerVariable>,
    /// Strength of this cycle's evidence, from the contributing
    /// coefficients, in [0, 1].
    pub strength: Score,
    /// Predictor value above which the trigger historically fires
    /// (mean + 0.5·std of the predictor series this cycle).
    pub trigger_threshold: f64,
}

/// Explicit user feedback on a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Confirm,
    Reject,
}

/// Confidence from history: strength damped by how often the pattern has
/// recurred and how often the user has validated it.
fn confidence_from_history(
    strength: Score,
    times_observed: u32,
    times_validated: u32,
    config: &TriggerConfig,
) -> Score {
    let saturation = config.observations_for_full_confidence.max(1);
    let observation_factor =
        (f64::from(times_observed) / f64::from(saturation)).min(1.0);
    let validation_bonus = if times_observed == 0 {
        0.0
    } else {
        0.2 * f64::from(times_validated) / f64::from(times_observed)
    };
    Score::new(strength.value() * observation_factor + validation_bonus)
}

/// Fold one cycle's evidence into an existing pattern, or create a new one.
///
/// Strength and threshold are EWMA-blended (`recency_weight` on the newest
/// evidence) so recent observations count more than old ones without a
/// single noisy measurement overwriting history. `times_observed` is
/// monotonically incremented; a re-observation also reactivates a
/// previously deactivated pattern and clears its missed-cycle count.
pub fn observe(
    existing: Option<&TriggerPattern>,
    candidate: &CandidateObservation,
    now: DateTime<Utc>,
    config: &TriggerConfig,
) -> TriggerPattern {
    match existing {
        None => {
            let strength = candidate.strength;
            TriggerPattern {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: candidate.user_id.clone(),
                symptom_type: candidate.symptom_type.clone(),
                pattern_type: candidate.pattern_type,
                trigger_variables: candidate.trigger_variables.clone(),
                pattern_strength: strength,
                confidence: confidence_from_history(strength, 1, 0, config),
                trigger_threshold: candidate.trigger_threshold,
                times_observed: 1,
                times_validated: 0,
                last_observed_at: now,
                is_active: true,
                user_acknowledged: false,
                missed_cycles: 0,
                created_at: now,
            }
        }
        Some(pattern) => {
            let w = config.recency_weight.clamp(0.0, 1.0);
            let strength = Score::new(
                pattern.pattern_strength.value() * (1.0 - w) + candidate.strength.value() * w,
            );
            let threshold =
                pattern.trigger_threshold * (1.0 - w) + candidate.trigger_threshold * w;
            let times_observed = pattern.times_observed.saturating_add(1);

            TriggerPattern {
                pattern_strength: strength,
                confidence: confidence_from_history(
                    strength,
                    times_observed,
                    pattern.times_validated,
                    config,
                ),
                trigger_threshold: threshold,
                trigger_variables: candidate.trigger_variables.clone(),
                times_observed,
                last_observed_at: now,
                is_active: true,
                missed_cycles: 0,
                ..pattern.clone()
            }
        }
    }
}

/// Fold explicit user feedback into a pattern.
///
/// Confirmation increments `times_validated` (never past `times_observed`)
/// and boosts confidence; rejection lowers confidence but floors it —
/// one rejection never zeroes a pattern.
pub fn apply_feedback(
    pattern: &TriggerPattern,
    feedback: Feedback,
    config: &TriggerConfig,
) -> TriggerPattern {
    match feedback {
        Feedback::Confirm => TriggerPattern {
            times_validated: pattern
                .times_validated
                .saturating_add(1)
                .min(pattern.times_observed),
            confidence: pattern.confidence + Score::new(config.confirm_boost),
            user_acknowledged: true,
            ..pattern.clone()
        },
        Feedback::Reject => {
            let lowered =
                (pattern.confidence.value() - config.reject_penalty).max(config.min_confidence_floor);
            TriggerPattern {
                confidence: Score::new(lowered),
                user_acknowledged: true,
                ..pattern.clone()
            }
        }
    }
}

/// Mark one analysis cycle in which a pattern was not re-observed.
/// After `max_missed_cycles` consecutive misses the pattern is deactivated
/// (retained for history, never deleted).
pub fn sweep_missed(pattern: &TriggerPattern, config: &TriggerConfig) -> TriggerPattern {
    let missed_cycles = pattern.missed_cycles.saturating_add(1);
    let is_active = pattern.is_active && missed_cycles < config.max_missed_cycles;
    TriggerPattern {
        missed_cycles,
        is_active,
        ..pattern.clone()
    }
}

//! Trigger eligibility: the significance gate applied on top of the raw
//! pairwise scan. The correlation engine reports every p-value as computed;
//! nothing becomes a user-visible trigger unless it clears this stricter
//! combined threshold.

use vital_core::config::TriggerConfig;
use vital_core::models::{CorrelationResult, EffectMagnitude};

/// A correlation is trigger-eligible when it is significant AND at least
/// moderate AND backed by enough paired days. All three must hold.
pub fn is_trigger_eligible(result: &CorrelationResult, config: &TriggerConfig) -> bool {
    result.p_value <= config.significance_level
        && result.effect_magnitude >= EffectMagnitude::Moderate
        && result.sample_size >= config.min_sample_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vital_core::models::{CorrelationKey, EffectType};

    fn result(p_value: f64, magnitude: EffectMagnitude, sample_size: usize) -> CorrelationResult {
        let now = Utc::now();
        CorrelationResult {
            id: "c".into(),
            key: CorrelationKey {
                user_id: "u".into(),
                variable_a: "nutrition.total_sugar_g".into(),
                variable_b: "symptom.migraine.severity".into(),
                lag_days: 1,
                analysis_period_days: 30,
            },
            coefficient: 0.6,
            p_value,
            sample_size,
            effect_type: EffectType::Positive,
            effect_magnitude: magnitude,
            computed_at: now,
            expires_at: now,
        }
    }

    #[test]
    fn all_three_gates_must_pass() {
        let cfg = TriggerConfig::default();
        assert!(is_trigger_eligible(&result(0.04, EffectMagnitude::Large, 8), &cfg));
        assert!(!is_trigger_eligible(&result(0.06, EffectMagnitude::Large, 8), &cfg));
        assert!(!is_trigger_eligible(&result(0.04, EffectMagnitude::Small, 8), &cfg));
        assert!(!is_trigger_eligible(&result(0.04, EffectMagnitude::Large, 4), &cfg));
    }

    #[test]
    fn moderate_magnitude_is_enough() {
        let cfg = TriggerConfig::default();
        assert!(is_trigger_eligible(&result(0.05, EffectMagnitude::Moderate, 5), &cfg));
    }
}

//! Effect sign and magnitude classification.

use vital_core::config::CorrelationConfig;
use vital_core::models::{EffectMagnitude, EffectType};

/// Sign classification: Neutral inside ±neutral_epsilon.
pub fn classify_type(coefficient: f64, config: &CorrelationConfig) -> EffectType {
    if coefficient.abs() < config.neutral_epsilon {
        EffectType::Neutral
    } else if coefficient > 0.0 {
        EffectType::Positive
    } else {
        EffectType::Negative
    }
}

/// Magnitude classification on |coefficient|:
/// < moderate_threshold → Small, ≤ large_threshold → Moderate, else Large.
pub fn classify_magnitude(coefficient: f64, config: &CorrelationConfig) -> EffectMagnitude {
    let abs = coefficient.abs();
    if abs < config.moderate_threshold {
        EffectMagnitude::Small
    } else if abs <= config.large_threshold {
        EffectMagnitude::Moderate
    } else {
        EffectMagnitude::Large
    }
}

//! Continuous score → discrete risk level mapping.

use vital_core::config::RiskConfig;
use vital_core::models::RiskLevel;

/// Map a score in [0, 1] to its band by the configured cut points.
pub fn level_for(score: f64, config: &RiskConfig) -> RiskLevel {
    if score < config.moderate_cut {
        RiskLevel::Low
    } else if score < config.high_cut {
        RiskLevel::Moderate
    } else if score < config.critical_cut {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cut_points() {
        let config = RiskConfig::default();
        assert_eq!(level_for(0.0, &config), RiskLevel::Low);
        assert_eq!(level_for(0.24, &config), RiskLevel::Low);
        assert_eq!(level_for(0.25, &config), RiskLevel::Moderate);
        assert_eq!(level_for(0.49, &config), RiskLevel::Moderate);
        assert_eq!(level_for(0.5, &config), RiskLevel::High);
        assert_eq!(level_for(0.74, &config), RiskLevel::High);
        assert_eq!(level_for(0.75, &config), RiskLevel::Critical);
        assert_eq!(level_for(1.0, &config), RiskLevel::Critical);
    }
}

//! Individual risk components and their factor traceback.
//!
//! Each component contributes a score in [0, 1] plus one seed per record
//! that produced it. Seeds carry an intra-component share (summing to 1)
//! so the engine can turn them into `ContributingFactor` weights that are
//! true shares of the final score.

use vital_core::config::ForecastConfig;
use vital_core::models::{AlignedSeries, FactorKind, Prediction, TriggerPattern};
use vital_forecast::fit_trend;

/// One traceable source of a component's score.
#[derive(Debug, Clone)]
pub struct FactorSeed {
    pub kind: FactorKind,
    pub reference_id: String,
    pub description: String,
    /// Share within the component, in [0, 1]; shares sum to 1.
    pub share: f64,
}

/// A scored component with its traceback seeds.
#[derive(Debug, Clone)]
pub struct Component {
    pub score: f64,
    pub seeds: Vec<FactorSeed>,
}

/// Adverse-trend component for one series. `adverse_when_rising` selects
/// the direction that counts as risk (rising symptom severity, falling
/// wearable metric). The projected relative change over `look_ahead_days`
/// is scaled so a 50% adverse change saturates, then discounted by the
/// fit's r² so noisy trends count less. None when the trend is benign or
/// unfittable.
pub(crate) fn trend_component(
    series: &AlignedSeries,
    adverse_when_rising: bool,
    look_ahead_days: f64,
    fit_config: &ForecastConfig,
) -> Option<Component> {
    let fit = fit_trend(
        series,
        fit_config.recency_half_life_days,
        fit_config.min_fit_points,
    )?;
    let mean = series.mean()?;
    if mean.abs() < f64::EPSILON {
        return None;
    }

    let last_index = (series.points.len() - 1) as f64;
    let projected = fit.value_at(last_index + look_ahead_days);
    let relative = (projected - mean) / mean.abs();
    let adverse = if adverse_when_rising { relative } else { -relative };
    if adverse <= 0.0 {
        return None;
    }

    let score = (adverse * 2.0).min(1.0) * fit.r_squared;
    if score <= 0.0 {
        return None;
    }
    let direction = if adverse_when_rising { "rising" } else { "declining" };
    Some(Component {
        score,
        seeds: vec![FactorSeed {
            kind: FactorKind::Trend,
            reference_id: series.variable.clone(),
            description: format!("{} {} ({:+.2}/day)", series.variable, direction, fit.slope),
            share: 1.0,
        }],
    })
}

/// Active-trigger component for one symptom. Each pattern contributes
/// strength × confidence; the strongest pattern sets the component score
/// and shares split proportionally.
pub(crate) fn trigger_component(
    symptom_type: &str,
    patterns: &[TriggerPattern],
) -> Option<Component> {
    let contributions: Vec<(&TriggerPattern, f64)> = patterns
        .iter()
        .filter(|p| p.is_active && p.symptom_type == symptom_type)
        .map(|p| (p, p.pattern_strength.value() * p.confidence.value()))
        .filter(|&(_, c)| c > 0.0)
        .collect();
    if contributions.is_empty() {
        return None;
    }

    let score = contributions
        .iter()
        .map(|&(_, c)| c)
        .fold(0.0_f64, f64::max);
    let total: f64 = contributions.iter().map(|&(_, c)| c).sum();
    let seeds = contributions
        .into_iter()
        .map(|(p, c)| FactorSeed {
            kind: FactorKind::TriggerPattern,
            reference_id: p.id.clone(),
            description: format!(
                "active trigger: {} → {}",
                p.variable_set().join(" + "),
                p.symptom_type
            ),
            share: c / total,
        })
        .collect();
    Some(Component { score, seeds })
}

/// Forecast component for a symptom severity metric (1–10 scale): pending
/// near-horizon forecasts weighted by the predicted severity and the
/// forecast's own confidence.
pub(crate) fn symptom_forecast_component(
    variable: &str,
    max_horizon_days: u32,
    predictions: &[Prediction],
) -> Option<Component> {
    const SEVERITY_SCALE: f64 = 10.0;
    forecast_component(variable, max_horizon_days, predictions, |p| {
        (p.predicted_value / SEVERITY_SCALE).clamp(0.0, 1.0) * p.confidence.value()
    })
}

/// Forecast component for a declining biometric: pending near-horizon
/// forecasts whose predicted value sits below the window mean, scored by
/// the relative drop (50% drop saturates) times forecast confidence.
pub(crate) fn decline_forecast_component(
    variable: &str,
    window_mean: f64,
    max_horizon_days: u32,
    predictions: &[Prediction],
) -> Option<Component> {
    if window_mean.abs() < f64::EPSILON {
        return None;
    }
    forecast_component(variable, max_horizon_days, predictions, move |p| {
        let drop = (window_mean - p.predicted_value) / window_mean.abs();
        if drop <= 0.0 {
            0.0
        } else {
            (drop * 2.0).min(1.0) * p.confidence.value()
        }
    })
}

fn forecast_component<F>(
    variable: &str,
    max_horizon_days: u32,
    predictions: &[Prediction],
    contribution: F,
) -> Option<Component>
where
    F: Fn(&Prediction) -> f64,
{
    let scored: Vec<(&Prediction, f64)> = predictions
        .iter()
        .filter(|p| p.metric == variable && p.is_pending() && p.horizon_days <= max_horizon_days)
        .map(|p| (p, contribution(p)))
        .filter(|&(_, c)| c > 0.0)
        .collect();
    if scored.is_empty() {
        return None;
    }

    let score = scored.iter().map(|&(_, c)| c).fold(0.0_f64, f64::max);
    let total: f64 = scored.iter().map(|&(_, c)| c).sum();
    let seeds = scored
        .into_iter()
        .map(|(p, c)| FactorSeed {
            kind: FactorKind::Forecast,
            reference_id: p.id.clone(),
            description: format!(
                "forecast {} ≈ {:.1} on {}",
                p.metric, p.predicted_value, p.prediction_date
            ),
            share: c / total,
        })
        .collect();
    Some(Component { score, seeds })
}

//! RiskEngine — weighted aggregation of trend, trigger, and forecast
//! components into per-category assessments.

use chrono::{DateTime, Duration, Utc};

use vital_core::config::{ForecastConfig, RiskConfig};
use vital_core::models::{
    symptom_type_of, AlignedSeries, ContributingFactor, FactorKind, Prediction, RiskAssessment,
    RiskCategory, Score, TriggerPattern, VariableFamily,
};
use vital_core::{DateWindow, VitalResult};

use crate::factors::{
    decline_forecast_component, symptom_forecast_component, trend_component, trigger_component,
    Component, FactorSeed,
};
use crate::level::level_for;

/// Days past the analysis window an assessment speaks for. Also the
/// horizon cutoff for "near-horizon" forecasts.
const RISK_WINDOW_DAYS: i64 = 7;

pub struct RiskEngine {
    risk: RiskConfig,
    forecast: ForecastConfig,
}

impl RiskEngine {
    pub fn new(risk: RiskConfig, forecast: ForecastConfig) -> Self {
        Self { risk, forecast }
    }

    /// Assess all categories for one user from the current run's series,
    /// patterns, and pending predictions. Assessments with nothing to
    /// trace back to are not emitted.
    pub fn assess(
        &self,
        user_id: &str,
        window: &DateWindow,
        series: &[AlignedSeries],
        patterns: &[TriggerPattern],
        predictions: &[Prediction],
        now: DateTime<Utc>,
    ) -> VitalResult<Vec<RiskAssessment>> {
        let risk_window = DateWindow::new(
            window.end + Duration::days(1),
            window.end + Duration::days(RISK_WINDOW_DAYS),
        )?;
        let mut assessments = Vec::new();

        for s in series.iter().filter(|s| s.family == VariableFamily::Symptom) {
            let Some(symptom) = symptom_type_of(&s.variable) else {
                continue;
            };
            let mut components = Vec::new();
            if let Some(c) =
                trend_component(s, true, RISK_WINDOW_DAYS as f64, &self.forecast)
            {
                components.push((self.risk.trend_weight, c));
            }
            if let Some(c) = trigger_component(symptom, patterns) {
                components.push((self.risk.trigger_weight, c));
            }
            if let Some(c) =
                symptom_forecast_component(&s.variable, RISK_WINDOW_DAYS as u32, predictions)
            {
                components.push((self.risk.forecast_weight, c));
            }
            if let Some(a) = self.build(
                user_id,
                RiskCategory::SymptomFlare,
                symptom,
                components,
                &risk_window,
                now,
            ) {
                assessments.push(a);
            }
        }

        for s in series.iter().filter(|s| s.family == VariableFamily::Wearable) {
            let mut components = Vec::new();
            if let Some(c) =
                trend_component(s, false, RISK_WINDOW_DAYS as f64, &self.forecast)
            {
                components.push((self.risk.trend_weight, c));
            }
            if let Some(mean) = s.mean() {
                if let Some(c) = decline_forecast_component(
                    &s.variable,
                    mean,
                    RISK_WINDOW_DAYS as u32,
                    predictions,
                ) {
                    components.push((self.risk.forecast_weight, c));
                }
            }
            if let Some(a) = self.build(
                user_id,
                RiskCategory::BiometricDecline,
                &s.variable,
                components,
                &risk_window,
                now,
            ) {
                assessments.push(a);
            }
        }

        for s in series
            .iter()
            .filter(|s| s.family == VariableFamily::Medication)
        {
            if let Some(c) = self.adherence_component(s) {
                if let Some(a) = self.build(
                    user_id,
                    RiskCategory::AdherenceLapse,
                    &s.variable,
                    vec![(1.0, c)],
                    &risk_window,
                    now,
                ) {
                    assessments.push(a);
                }
            }
        }

        if let Some(worst) = assessments.iter().max_by(|a, b| {
            a.risk_score
                .value()
                .total_cmp(&b.risk_score.value())
        }) {
            let overall = RiskAssessment {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                category: RiskCategory::Overall,
                risk_type: "overall".to_string(),
                risk_score: worst.risk_score,
                risk_level: worst.risk_level,
                risk_window,
                contributing_factors: worst.contributing_factors.clone(),
                is_active: true,
                assessed_at: now,
            };
            assessments.push(overall);
        }

        tracing::debug!(
            user_id,
            count = assessments.len(),
            "risk assessment complete"
        );
        Ok(assessments)
    }

    /// Missed doses over the window. Medication series are 0/1 taken
    /// indicators, so the lapse score is one minus the adherence rate.
    fn adherence_component(&self, series: &AlignedSeries) -> Option<Component> {
        if series.observed_days() < self.forecast.min_fit_points {
            return None;
        }
        let rate = series.mean()?.clamp(0.0, 1.0);
        let score = 1.0 - rate;
        if score <= 0.0 {
            return None;
        }
        Some(Component {
            score,
            seeds: vec![FactorSeed {
                kind: FactorKind::Trend,
                reference_id: series.variable.clone(),
                description: format!(
                    "{} adherence {:.0}% over the window",
                    series.variable,
                    rate * 100.0
                ),
                share: 1.0,
            }],
        })
    }

    fn build(
        &self,
        user_id: &str,
        category: RiskCategory,
        risk_type: &str,
        components: Vec<(f64, Component)>,
        risk_window: &DateWindow,
        now: DateTime<Utc>,
    ) -> Option<RiskAssessment> {
        if components.is_empty() {
            return None;
        }
        let (score, contributing_factors) = combine(&components);
        if score <= 0.0 {
            return None;
        }
        Some(RiskAssessment {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category,
            risk_type: risk_type.to_string(),
            risk_score: Score::new(score),
            risk_level: level_for(score, &self.risk),
            risk_window: *risk_window,
            contributing_factors,
            is_active: true,
            assessed_at: now,
        })
    }
}

/// Weighted combination. Weights are normalized over the components that
/// are actually present, and each factor's weight ends up as its true
/// share of the final score.
fn combine(components: &[(f64, Component)]) -> (f64, Vec<ContributingFactor>) {
    let total_weight: f64 = components.iter().map(|(w, _)| *w).sum();
    let score: f64 = components
        .iter()
        .map(|(w, c)| (w / total_weight) * c.score)
        .sum();

    let mut factors = Vec::new();
    for (w, c) in components {
        let component_share = if score > 0.0 {
            (w / total_weight) * c.score / score
        } else {
            0.0
        };
        for seed in &c.seeds {
            factors.push(ContributingFactor {
                kind: seed.kind,
                reference_id: seed.reference_id.clone(),
                description: seed.description.clone(),
                weight: component_share * seed.share,
            });
        }
    }
    (score, factors)
}

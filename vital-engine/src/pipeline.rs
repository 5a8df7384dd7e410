//! One full analysis pass for a scope, as free functions over the stores.
//!
//! Stages run sequentially (each consumes the prior stage's output); the
//! correlation scan parallelizes internally. A failing series source
//! excludes only its variables and marks the run partial — it never aborts
//! the pass.

use chrono::{DateTime, Utc};

use vital_align::align_all;
use vital_core::models::{AnalysisSnapshot, Observation, Prediction, PredictionType};
use vital_core::traits::{IResultStore, ISeriesStore};
use vital_core::{AnalysisScope, VariableFamily, VitalConfig, VitalResult};
use vital_correlate::CorrelationEngine;
use vital_forecast::ForecastEngine;
use vital_risk::RiskEngine;
use vital_trigger::DetectorEngine;

/// Raw observations for a scope, with source failures degraded to
/// exclusions.
pub struct FetchOutcome {
    pub observations: Vec<Observation>,
    pub excluded_variables: Vec<String>,
}

/// Fetch every tracked variable for the scope, one call per variable so a
/// single source's outage costs only its own variables.
pub fn fetch_observations<S: ISeriesStore>(
    store: &S,
    scope: &AnalysisScope,
) -> VitalResult<FetchOutcome> {
    let variables = store.variables_for(&scope.user_id)?;
    let mut observations = Vec::new();
    let mut excluded_variables = Vec::new();
    for variable in variables {
        match store.fetch_series(&scope.user_id, &variable, scope.window) {
            Ok(mut batch) => observations.append(&mut batch),
            Err(e) => {
                tracing::warn!(
                    variable,
                    error = %e,
                    "series fetch failed, excluding variable from this run"
                );
                excluded_variables.push(variable);
            }
        }
    }
    Ok(FetchOutcome {
        observations,
        excluded_variables,
    })
}

/// Run the full pipeline for one scope and persist every result family.
pub fn run<S: ISeriesStore, R: IResultStore>(
    series_store: &S,
    result_store: &R,
    config: &VitalConfig,
    scope: &AnalysisScope,
    now: DateTime<Utc>,
) -> VitalResult<AnalysisSnapshot> {
    let fetched = fetch_observations(series_store, scope)?;
    let mut excluded_variables = fetched.excluded_variables;

    let (series, skipped) = align_all(
        &scope.user_id,
        &fetched.observations,
        scope.window,
        &config.align,
    );
    excluded_variables.extend(skipped);

    let correlations = CorrelationEngine::new(config.correlation.clone()).scan(
        &series,
        scope,
        config.align.quality_floor,
        now,
    );
    for result in &correlations {
        result_store.upsert_correlation(result)?;
    }

    let existing = result_store.patterns_for(&scope.user_id)?;
    let outcome =
        DetectorEngine::new(config.trigger.clone()).detect(&series, &correlations, &existing, now);
    for pattern in &outcome.patterns {
        result_store.upsert_pattern(pattern)?;
    }
    // The snapshot reflects persisted state, not just this cycle's deltas.
    let patterns = result_store.patterns_for(&scope.user_id)?;

    let predictions = forecast_metrics(&series, config, now);
    for prediction in &predictions {
        result_store.insert_prediction(prediction)?;
    }

    let risks = RiskEngine::new(config.risk.clone(), config.forecast.clone()).assess(
        &scope.user_id,
        &scope.window,
        &series,
        &patterns,
        &predictions,
        now,
    )?;
    for assessment in &risks {
        result_store.upsert_risk(assessment)?;
    }

    tracing::info!(
        user_id = %scope.user_id,
        correlations = correlations.len(),
        patterns = patterns.len(),
        predictions = predictions.len(),
        risks = risks.len(),
        partial = !excluded_variables.is_empty(),
        "analysis pass complete"
    );

    Ok(AnalysisSnapshot {
        scope: scope.clone(),
        correlations,
        patterns,
        predictions,
        risks,
        partial: !excluded_variables.is_empty(),
        excluded_variables,
        computed_at: now,
    })
}

/// Forecast continuous metrics: wearable values as metric forecasts,
/// symptom severities as symptom-risk forecasts. Low-quality series are
/// not forecast.
fn forecast_metrics(
    series: &[vital_core::AlignedSeries],
    config: &VitalConfig,
    now: DateTime<Utc>,
) -> Vec<Prediction> {
    let engine = ForecastEngine::new(config.forecast.clone());
    let mut predictions = Vec::new();
    for s in series {
        let forecastable = matches!(
            s.family,
            VariableFamily::Wearable | VariableFamily::Symptom
        );
        if !forecastable || s.is_low_quality(config.align.quality_floor) {
            continue;
        }
        let mut batch = engine.forecast_metric(s, now);
        if s.family == VariableFamily::Symptom {
            for p in &mut batch {
                p.prediction_type = PredictionType::SymptomRisk;
            }
        }
        predictions.append(&mut batch);
    }
    predictions
}

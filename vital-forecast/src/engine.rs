//! ForecastEngine — runs a pluggable forecaster over target metrics at the
//! configured horizons and materializes Prediction rows.

use chrono::{DateTime, Duration, Utc};

use vital_core::config::ForecastConfig;
use vital_core::models::{
    AlignedSeries, Prediction, PredictionRange, PredictionStatus, PredictionType, Score,
};

use crate::confidence::forecast_confidence;
use crate::trend::fit_trend;

/// A single-horizon forecast before it becomes a Prediction row.
#[derive(Debug, Clone, Copy)]
pub struct PointForecast {
    pub predicted_value: f64,
    pub confidence: Score,
    pub lower: f64,
    pub upper: f64,
}

/// The substitutable forecasting method. Implementations must honor the
/// calibration contract: lower confidence and wider intervals for sparser
/// or noisier input, intervals widening with horizon.
pub trait Forecaster: Send + Sync {
    fn name(&self) -> &'static str;

    /// Forecast `horizon_days` past the end of the series' window.
    /// None when the series cannot support a forecast (too few points,
    /// degenerate fit) — an "insufficient data" outcome, not an error.
    fn forecast(
        &self,
        series: &AlignedSeries,
        horizon_days: u32,
        config: &ForecastConfig,
    ) -> Option<PointForecast>;
}

/// Baseline statistical forecaster: recency-weighted trend extrapolation
/// with a residual-based interval.
#[derive(Debug, Default)]
pub struct TrendForecaster;

impl Forecaster for TrendForecaster {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn forecast(
        &self,
        series: &AlignedSeries,
        horizon_days: u32,
        config: &ForecastConfig,
    ) -> Option<PointForecast> {
        let fit = fit_trend(series, config.recency_half_life_days, config.min_fit_points)?;
        let last_index = (series.points.len() - 1) as f64;
        let predicted_value = fit.value_at(last_index + f64::from(horizon_days));

        // Interval widens with horizon: extrapolation uncertainty grows
        // the further past the observed window we project.
        let growth = (1.0 + f64::from(horizon_days) / fit.n as f64).sqrt();
        let half_width = config.interval_z * fit.residual_std * growth;

        let breakdown = forecast_confidence(series, &fit, horizon_days);
        Some(PointForecast {
            predicted_value,
            confidence: Score::new(breakdown.final_confidence),
            lower: predicted_value - half_width,
            upper: predicted_value + half_width,
        })
    }
}

/// Drives a forecaster across metrics and horizons.
pub struct ForecastEngine<F: Forecaster = TrendForecaster> {
    forecaster: F,
    config: ForecastConfig,
}

impl ForecastEngine<TrendForecaster> {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            forecaster: TrendForecaster,
            config,
        }
    }
}

impl<F: Forecaster> ForecastEngine<F> {
    /// Use a different forecasting method. The Prediction shape is fixed.
    pub fn with_forecaster(forecaster: F, config: ForecastConfig) -> Self {
        Self { forecaster, config }
    }

    /// Forecast one metric at every configured horizon.
    /// Horizons the series cannot support are skipped, not zero-filled.
    pub fn forecast_metric(&self, series: &AlignedSeries, now: DateTime<Utc>) -> Vec<Prediction> {
        let mut predictions = Vec::new();
        for &horizon_days in &self.config.horizons {
            let Some(forecast) = self.forecaster.forecast(series, horizon_days, &self.config)
            else {
                tracing::debug!(
                    metric = %series.variable,
                    horizon_days,
                    method = self.forecaster.name(),
                    "insufficient data for forecast"
                );
                continue;
            };
            predictions.push(Prediction {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: series.user_id.clone(),
                prediction_type: PredictionType::MetricForecast,
                metric: series.variable.clone(),
                prediction_date: series.window.end + Duration::days(i64::from(horizon_days)),
                horizon_days,
                predicted_value: forecast.predicted_value,
                confidence: forecast.confidence,
                range: PredictionRange {
                    lower: forecast.lower,
                    upper: forecast.upper,
                },
                actual_value: None,
                prediction_error: None,
                status: PredictionStatus::Pending,
                created_at: now,
            });
        }
        predictions
    }
}

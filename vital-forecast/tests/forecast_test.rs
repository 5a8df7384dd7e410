use chrono::{NaiveDate, Utc};
use vital_core::config::ForecastConfig;
use vital_core::models::{
    AlignedSeries, Prediction, PredictionRange, PredictionStatus, PredictionType, Score,
    VariableFamily,
};
use vital_core::DateWindow;
use vital_forecast::{reconcile, ForecastEngine, ReconcileOutcome};

fn series(points: Vec<Option<f64>>) -> AlignedSeries {
    let start: NaiveDate = "2026-03-01".parse().unwrap();
    let end = start + chrono::Duration::days(points.len() as i64 - 1);
    let quality = points.iter().filter(|p| p.is_some()).count() as f64 / points.len() as f64;
    AlignedSeries {
        user_id: "u".into(),
        variable: "wearable.sleep_score".into(),
        family: VariableFamily::Wearable,
        window: DateWindow::new(start, end).unwrap(),
        data_quality: Score::new(quality),
        points,
    }
}

fn linear_series(n: usize) -> AlignedSeries {
    series((0..n).map(|i| Some(60.0 + 0.5 * i as f64)).collect())
}

#[test]
fn forecasts_every_supported_horizon() {
    let engine = ForecastEngine::new(ForecastConfig::default());
    let s = linear_series(30);
    let predictions = engine.forecast_metric(&s, Utc::now());

    assert_eq!(predictions.len(), 5);
    for p in &predictions {
        assert_eq!(p.prediction_type, PredictionType::MetricForecast);
        assert_eq!(p.status, PredictionStatus::Pending);
        assert!(p.actual_value.is_none());
        assert_eq!(
            p.prediction_date,
            s.window.end + chrono::Duration::days(i64::from(p.horizon_days))
        );
        assert!(p.range.lower <= p.predicted_value && p.predicted_value <= p.range.upper);
    }
}

#[test]
fn trend_extrapolation_is_exact_on_linear_data() {
    let engine = ForecastEngine::new(ForecastConfig::default());
    let s = linear_series(30);
    let predictions = engine.forecast_metric(&s, Utc::now());
    let p1 = predictions.iter().find(|p| p.horizon_days == 1).unwrap();
    // Last observed value is 60 + 0.5*29 = 74.5; one day ahead is 75.0.
    assert!((p1.predicted_value - 75.0).abs() < 1e-6);
}

#[test]
fn intervals_widen_and_confidence_drops_with_horizon() {
    let engine = ForecastEngine::new(ForecastConfig::default());
    // Noisy series so the residual std is non-trivial.
    let s = series(
        (0..30)
            .map(|i| Some(70.0 + if i % 2 == 0 { 6.0 } else { -6.0 }))
            .collect(),
    );
    let predictions = engine.forecast_metric(&s, Utc::now());

    let width = |p: &Prediction| p.range.upper - p.range.lower;
    for pair in predictions.windows(2) {
        assert!(pair[0].horizon_days < pair[1].horizon_days);
        assert!(width(&pair[0]) <= width(&pair[1]) + 1e-9);
        assert!(pair[0].confidence.value() >= pair[1].confidence.value());
    }
}

#[test]
fn sparser_input_lowers_confidence() {
    let engine = ForecastEngine::new(ForecastConfig::default());
    let dense = linear_series(30);
    let sparse = series(
        (0..30)
            .map(|i| {
                if i % 3 == 0 {
                    Some(60.0 + 0.5 * i as f64)
                } else {
                    None
                }
            })
            .collect(),
    );
    let dense_p = engine.forecast_metric(&dense, Utc::now());
    let sparse_p = engine.forecast_metric(&sparse, Utc::now());
    let dense_c = dense_p.iter().find(|p| p.horizon_days == 7).unwrap();
    let sparse_c = sparse_p.iter().find(|p| p.horizon_days == 7).unwrap();
    assert!(sparse_c.confidence.value() < dense_c.confidence.value());
}

#[test]
fn noisier_input_lowers_confidence() {
    let engine = ForecastEngine::new(ForecastConfig::default());
    let calm = linear_series(30);
    let noisy = series(
        (0..30)
            .map(|i| Some(60.0 + 0.5 * i as f64 + if i % 2 == 0 { 15.0 } else { -15.0 }))
            .collect(),
    );
    let calm_c = engine
        .forecast_metric(&calm, Utc::now())
        .into_iter()
        .find(|p| p.horizon_days == 7)
        .unwrap();
    let noisy_c = engine
        .forecast_metric(&noisy, Utc::now())
        .into_iter()
        .find(|p| p.horizon_days == 7)
        .unwrap();
    assert!(noisy_c.confidence.value() < calm_c.confidence.value());
}

#[test]
fn too_few_points_produces_no_predictions() {
    let engine = ForecastEngine::new(ForecastConfig::default());
    let s = series(vec![Some(70.0), Some(71.0), None, None, None, None, None]);
    assert!(engine.forecast_metric(&s, Utc::now()).is_empty());
}

// ── Reconciliation ───────────────────────────────────────────────────────

fn pending_prediction(predicted: f64, lower: f64, upper: f64) -> Prediction {
    Prediction {
        id: "p1".into(),
        user_id: "u".into(),
        prediction_type: PredictionType::MetricForecast,
        metric: "wearable.sleep_score".into(),
        prediction_date: "2026-03-10".parse().unwrap(),
        horizon_days: 7,
        predicted_value: predicted,
        confidence: Score::new(0.7),
        range: PredictionRange { lower, upper },
        actual_value: None,
        prediction_error: None,
        status: PredictionStatus::Pending,
        created_at: Utc::now(),
    }
}

#[test]
fn sleep_score_scenario_confirms_within_band() {
    // predicted 72, actual 70, error 2, band floors at 8 points.
    let config = ForecastConfig::default();
    let mut p = pending_prediction(72.0, 65.0, 79.0);
    let outcome = reconcile(&mut p, Some(70.0), 3.0, &config);
    assert_eq!(outcome, ReconcileOutcome::Confirmed);
    assert_eq!(p.status, PredictionStatus::Confirmed);
    assert_eq!(p.actual_value, Some(70.0));
    assert_eq!(p.prediction_error, Some(2.0));
}

#[test]
fn large_error_marks_inaccurate() {
    let config = ForecastConfig::default();
    let mut p = pending_prediction(72.0, 65.0, 79.0);
    let outcome = reconcile(&mut p, Some(50.0), 3.0, &config);
    assert_eq!(outcome, ReconcileOutcome::Inaccurate);
    assert_eq!(p.prediction_error, Some(22.0));
}

#[test]
fn reconciliation_is_idempotent() {
    let config = ForecastConfig::default();
    let mut p = pending_prediction(72.0, 65.0, 79.0);
    assert_eq!(reconcile(&mut p, Some(70.0), 3.0, &config), ReconcileOutcome::Confirmed);
    let snapshot = p.clone();

    // Second run with a different "actual" must not overwrite anything.
    let outcome = reconcile(&mut p, Some(99.0), 3.0, &config);
    assert_eq!(outcome, ReconcileOutcome::AlreadyReconciled);
    assert_eq!(p, snapshot);
}

#[test]
fn missing_actual_defers() {
    let config = ForecastConfig::default();
    let mut p = pending_prediction(72.0, 65.0, 79.0);
    assert_eq!(reconcile(&mut p, None, 3.0, &config), ReconcileOutcome::NoObservation);
    assert!(p.is_pending());
    assert!(p.actual_value.is_none());
}

#[test]
fn band_scales_with_historical_variability() {
    let config = ForecastConfig {
        min_accuracy_band: 1.0,
        accuracy_band_sigma: 1.0,
        ..ForecastConfig::default()
    };
    // Error of 5 against a volatile metric (std 10) confirms…
    let mut volatile = pending_prediction(72.0, 60.0, 84.0);
    assert_eq!(
        reconcile(&mut volatile, Some(67.0), 10.0, &config),
        ReconcileOutcome::Confirmed
    );
    // …but the same error against a steady metric (std 2) does not.
    let mut steady = pending_prediction(72.0, 70.0, 74.0);
    assert_eq!(
        reconcile(&mut steady, Some(67.0), 2.0, &config),
        ReconcileOutcome::Inaccurate
    );
}

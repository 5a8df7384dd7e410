use chrono::{NaiveDate, Utc};
use vital_core::config::{ForecastConfig, RiskConfig};
use vital_core::models::{
    FactorKind, PatternType, Prediction, PredictionRange, PredictionStatus, PredictionType,
    RiskCategory, RiskLevel, Score, TriggerPattern, TriggerVariable, VariableFamily,
};
use vital_core::{AlignedSeries, DateWindow};
use vital_risk::RiskEngine;

fn window(days: usize) -> DateWindow {
    let start: NaiveDate = "2026-03-01".parse().unwrap();
    DateWindow::new(start, start + chrono::Duration::days(days as i64 - 1)).unwrap()
}

fn series(variable: &str, family: VariableFamily, points: Vec<Option<f64>>) -> AlignedSeries {
    let quality = points.iter().filter(|p| p.is_some()).count() as f64 / points.len() as f64;
    AlignedSeries {
        user_id: "u".into(),
        variable: variable.into(),
        family,
        window: window(points.len()),
        data_quality: Score::new(quality),
        points,
    }
}

fn engine() -> RiskEngine {
    RiskEngine::new(RiskConfig::default(), ForecastConfig::default())
}

fn migraine_pattern(strength: f64, confidence: f64) -> TriggerPattern {
    TriggerPattern {
        id: "tp-1".into(),
        user_id: "u".into(),
        symptom_type: "migraine".into(),
        pattern_type: PatternType::FoodTrigger,
        trigger_variables: vec![TriggerVariable {
            variable: "nutrition.sugar_g".into(),
            coefficient: 0.85,
            p_value: 0.01,
        }],
        pattern_strength: Score::new(strength),
        confidence: Score::new(confidence),
        trigger_threshold: 90.0,
        times_observed: 4,
        times_validated: 2,
        last_observed_at: Utc::now(),
        is_active: true,
        user_acknowledged: false,
        missed_cycles: 0,
        created_at: Utc::now(),
    }
}

fn severity_forecast(variable: &str, predicted: f64, horizon: u32) -> Prediction {
    Prediction {
        id: format!("pred-{horizon}"),
        user_id: "u".into(),
        prediction_type: PredictionType::MetricForecast,
        metric: variable.into(),
        prediction_date: "2026-03-15".parse().unwrap(),
        horizon_days: horizon,
        predicted_value: predicted,
        confidence: Score::new(0.8),
        range: PredictionRange {
            lower: predicted - 2.0,
            upper: predicted + 2.0,
        },
        actual_value: None,
        prediction_error: None,
        status: PredictionStatus::Pending,
        created_at: Utc::now(),
    }
}

#[test]
fn symptom_flare_combines_trend_trigger_and_forecast() {
    let severity = series(
        "symptom.migraine.severity",
        VariableFamily::Symptom,
        (0..14).map(|i| Some(2.0 + 0.3 * i as f64)).collect(),
    );
    let win = severity.window;
    let patterns = vec![migraine_pattern(0.8, 0.7)];
    let predictions = vec![severity_forecast("symptom.migraine.severity", 7.0, 3)];

    let assessments = engine()
        .assess("u", &win, &[severity], &patterns, &predictions, Utc::now())
        .unwrap();

    let flare = assessments
        .iter()
        .find(|a| a.category == RiskCategory::SymptomFlare)
        .unwrap();
    assert_eq!(flare.risk_type, "migraine");
    assert!(flare.risk_score.value() > 0.0);
    assert!(flare.is_active);

    // One factor per contributing record, weights a partition of the score.
    let kinds: Vec<FactorKind> = flare.contributing_factors.iter().map(|f| f.kind).collect();
    assert!(kinds.contains(&FactorKind::Trend));
    assert!(kinds.contains(&FactorKind::TriggerPattern));
    assert!(kinds.contains(&FactorKind::Forecast));
    assert!(flare
        .contributing_factors
        .iter()
        .any(|f| f.reference_id == "tp-1"));
    let weight_sum: f64 = flare.contributing_factors.iter().map(|f| f.weight).sum();
    assert!((weight_sum - 1.0).abs() < 1e-9);
}

#[test]
fn flat_symptom_with_no_evidence_produces_nothing() {
    let severity = series(
        "symptom.migraine.severity",
        VariableFamily::Symptom,
        vec![Some(3.0); 14],
    );
    let win = severity.window;
    let assessments = engine()
        .assess("u", &win, &[severity], &[], &[], Utc::now())
        .unwrap();
    assert!(assessments.is_empty());
}

#[test]
fn inactive_patterns_do_not_contribute() {
    let severity = series(
        "symptom.migraine.severity",
        VariableFamily::Symptom,
        vec![Some(3.0); 14],
    );
    let win = severity.window;
    let mut pattern = migraine_pattern(0.8, 0.7);
    pattern.is_active = false;
    let assessments = engine()
        .assess("u", &win, &[severity], &[pattern], &[], Utc::now())
        .unwrap();
    assert!(assessments.is_empty());
}

#[test]
fn declining_wearable_raises_biometric_decline() {
    let sleep = series(
        "wearable.sleep_score",
        VariableFamily::Wearable,
        (0..14).map(|i| Some(85.0 - 2.5 * i as f64)).collect(),
    );
    let win = sleep.window;
    let assessments = engine()
        .assess("u", &win, &[sleep], &[], &[], Utc::now())
        .unwrap();

    let decline = assessments
        .iter()
        .find(|a| a.category == RiskCategory::BiometricDecline)
        .unwrap();
    assert_eq!(decline.risk_type, "wearable.sleep_score");
    assert!(decline.risk_level >= RiskLevel::Moderate);
    assert_eq!(decline.contributing_factors.len(), 1);
    assert_eq!(decline.contributing_factors[0].kind, FactorKind::Trend);
}

#[test]
fn improving_wearable_produces_no_decline_assessment() {
    let sleep = series(
        "wearable.sleep_score",
        VariableFamily::Wearable,
        (0..14).map(|i| Some(60.0 + 1.5 * i as f64)).collect(),
    );
    let win = sleep.window;
    let assessments = engine()
        .assess("u", &win, &[sleep], &[], &[], Utc::now())
        .unwrap();
    assert!(assessments.is_empty());
}

#[test]
fn missed_doses_raise_adherence_lapse() {
    let points = vec![
        Some(1.0), Some(0.0), Some(1.0), Some(0.0), Some(1.0),
        Some(0.0), Some(1.0), Some(0.0), Some(1.0), Some(1.0),
    ];
    let med = series("medication.magnesium.taken", VariableFamily::Medication, points);
    let win = med.window;
    let assessments = engine()
        .assess("u", &win, &[med], &[], &[], Utc::now())
        .unwrap();

    let lapse = assessments
        .iter()
        .find(|a| a.category == RiskCategory::AdherenceLapse)
        .unwrap();
    // 6/10 taken → lapse score 0.4 → moderate band.
    assert!((lapse.risk_score.value() - 0.4).abs() < 1e-9);
    assert_eq!(lapse.risk_level, RiskLevel::Moderate);
}

#[test]
fn perfect_adherence_produces_nothing() {
    let med = series(
        "medication.magnesium.taken",
        VariableFamily::Medication,
        vec![Some(1.0); 10],
    );
    let win = med.window;
    let assessments = engine()
        .assess("u", &win, &[med], &[], &[], Utc::now())
        .unwrap();
    assert!(assessments.is_empty());
}

#[test]
fn overall_is_the_maximum_category_score() {
    let severity = series(
        "symptom.migraine.severity",
        VariableFamily::Symptom,
        (0..14).map(|i| Some(2.0 + 0.3 * i as f64)).collect(),
    );
    let med = series(
        "medication.magnesium.taken",
        VariableFamily::Medication,
        vec![
            Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(1.0),
            Some(1.0), Some(1.0), Some(1.0), Some(1.0), Some(0.0),
            Some(1.0), Some(1.0), Some(1.0), Some(1.0),
        ],
    );
    let win = severity.window;
    let patterns = vec![migraine_pattern(0.9, 0.9)];

    let assessments = engine()
        .assess("u", &win, &[severity, med], &patterns, &[], Utc::now())
        .unwrap();

    let overall = assessments
        .iter()
        .find(|a| a.category == RiskCategory::Overall)
        .unwrap();
    let max_other = assessments
        .iter()
        .filter(|a| a.category != RiskCategory::Overall)
        .map(|a| a.risk_score.value())
        .fold(0.0_f64, f64::max);
    assert!((overall.risk_score.value() - max_other).abs() < 1e-9);
    assert!(!overall.contributing_factors.is_empty());
}

#[test]
fn risk_window_starts_after_the_analysis_window() {
    let severity = series(
        "symptom.migraine.severity",
        VariableFamily::Symptom,
        (0..14).map(|i| Some(2.0 + 0.3 * i as f64)).collect(),
    );
    let win = severity.window;
    let assessments = engine()
        .assess("u", &win, &[severity], &[], &[], Utc::now())
        .unwrap();
    let flare = &assessments[0];
    assert_eq!(flare.risk_window.start, win.end + chrono::Duration::days(1));
    assert!(flare.risk_window.end > flare.risk_window.start);
}

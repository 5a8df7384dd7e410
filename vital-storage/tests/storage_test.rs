use chrono::{Duration, NaiveDate, Utc};
use vital_core::models::{
    ContributingFactor, CorrelationKey, CorrelationResult, EffectMagnitude, EffectType,
    FactorKind, NutritionEntry, PatternType, Prediction, PredictionRange, PredictionStatus,
    PredictionType, RiskAssessment, RiskCategory, RiskLevel, Score, SymptomJournalEntry,
    TriggerPattern, TriggerVariable,
};
use vital_core::traits::{IResultStore, ISeriesStore};
use vital_core::{DateWindow, StoreError};
use vital_storage::{MemorySeriesStore, StorageEngine};

fn correlation(user: &str, lag: u32, coefficient: f64) -> CorrelationResult {
    let now = Utc::now();
    CorrelationResult {
        id: uuid::Uuid::new_v4().to_string(),
        key: CorrelationKey {
            user_id: user.into(),
            variable_a: "nutrition.total_sugar_g".into(),
            variable_b: "symptom.migraine.severity".into(),
            lag_days: lag,
            analysis_period_days: 30,
        },
        coefficient,
        p_value: 0.02,
        sample_size: 14,
        effect_type: EffectType::Positive,
        effect_magnitude: EffectMagnitude::Large,
        computed_at: now,
        expires_at: now + Duration::days(7),
    }
}

fn pattern(id: &str, user: &str) -> TriggerPattern {
    TriggerPattern {
        id: id.into(),
        user_id: user.into(),
        symptom_type: "migraine".into(),
        pattern_type: PatternType::FoodTrigger,
        trigger_variables: vec![TriggerVariable {
            variable: "nutrition.total_sugar_g".into(),
            coefficient: 0.85,
            p_value: 0.02,
        }],
        pattern_strength: Score::new(0.7),
        confidence: Score::new(0.6),
        trigger_threshold: 90.0,
        times_observed: 1,
        times_validated: 0,
        last_observed_at: Utc::now(),
        is_active: true,
        user_acknowledged: false,
        missed_cycles: 0,
        created_at: Utc::now(),
    }
}

fn prediction(id: &str, user: &str, date: NaiveDate) -> Prediction {
    Prediction {
        id: id.into(),
        user_id: user.into(),
        prediction_type: PredictionType::MetricForecast,
        metric: "wearable.sleep_score".into(),
        prediction_date: date,
        horizon_days: 7,
        predicted_value: 72.0,
        confidence: Score::new(0.7),
        range: PredictionRange {
            lower: 65.0,
            upper: 79.0,
        },
        actual_value: None,
        prediction_error: None,
        status: PredictionStatus::Pending,
        created_at: Utc::now(),
    }
}

fn assessment(user: &str, risk_type: &str, score: f64) -> RiskAssessment {
    let start: NaiveDate = "2026-03-15".parse().unwrap();
    RiskAssessment {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.into(),
        category: RiskCategory::SymptomFlare,
        risk_type: risk_type.into(),
        risk_score: Score::new(score),
        risk_level: RiskLevel::Moderate,
        risk_window: DateWindow::new(start, start + Duration::days(6)).unwrap(),
        contributing_factors: vec![ContributingFactor {
            kind: FactorKind::TriggerPattern,
            reference_id: "tp-1".into(),
            description: "active trigger: sugar → migraine".into(),
            weight: 1.0,
        }],
        is_active: true,
        assessed_at: Utc::now(),
    }
}

#[test]
fn correlation_upsert_replaces_by_logical_key() {
    let store = StorageEngine::open_in_memory().unwrap();
    store.upsert_correlation(&correlation("u", 1, 0.82)).unwrap();
    store.upsert_correlation(&correlation("u", 1, 0.91)).unwrap();

    let stored = store.correlations_for("u", 30).unwrap();
    assert_eq!(stored.len(), 1);
    assert!((stored[0].coefficient - 0.91).abs() < 1e-9);

    // A different lag is a different logical key.
    store.upsert_correlation(&correlation("u", 2, 0.5)).unwrap();
    assert_eq!(store.correlations_for("u", 30).unwrap().len(), 2);
}

#[test]
fn correlation_roundtrip_preserves_fields() {
    let store = StorageEngine::open_in_memory().unwrap();
    let original = correlation("u", 1, 0.82);
    store.upsert_correlation(&original).unwrap();

    let stored = store.correlations_for("u", 30).unwrap().remove(0);
    assert_eq!(stored.key, original.key);
    assert_eq!(stored.effect_type, EffectType::Positive);
    assert_eq!(stored.effect_magnitude, EffectMagnitude::Large);
    assert_eq!(stored.sample_size, 14);
}

#[test]
fn purge_removes_only_expired_rows() {
    let store = StorageEngine::open_in_memory().unwrap();
    let mut expired = correlation("u", 1, 0.5);
    expired.expires_at = Utc::now() - Duration::days(1);
    store.upsert_correlation(&expired).unwrap();
    store.upsert_correlation(&correlation("u", 2, 0.6)).unwrap();

    let purged = store.purge_expired_correlations(Utc::now()).unwrap();
    assert_eq!(purged, 1);
    let remaining = store.correlations_for("u", 30).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].key.lag_days, 2);
}

#[test]
fn pattern_upsert_and_lookup() {
    let store = StorageEngine::open_in_memory().unwrap();
    let mut p = pattern("tp-1", "u");
    store.upsert_pattern(&p).unwrap();

    p.times_observed = 2;
    p.confidence = Score::new(0.75);
    store.upsert_pattern(&p).unwrap();

    let stored = store.get_pattern("tp-1").unwrap().unwrap();
    assert_eq!(stored.times_observed, 2);
    assert!((stored.confidence.value() - 0.75).abs() < 1e-9);
    assert_eq!(stored.trigger_variables.len(), 1);
    assert_eq!(store.patterns_for("u").unwrap().len(), 1);
    assert!(store.get_pattern("missing").unwrap().is_none());
}

#[test]
fn due_predictions_and_reconciled_writeback() {
    let store = StorageEngine::open_in_memory().unwrap();
    let today: NaiveDate = "2026-03-10".parse().unwrap();
    store
        .insert_prediction(&prediction("p1", "u", today - Duration::days(1)))
        .unwrap();
    store
        .insert_prediction(&prediction("p2", "u", today + Duration::days(3)))
        .unwrap();

    let due = store.due_predictions("u", today).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, "p1");

    let mut reconciled = due.into_iter().next().unwrap();
    reconciled.actual_value = Some(70.0);
    reconciled.prediction_error = Some(2.0);
    reconciled.status = PredictionStatus::Confirmed;
    store.update_prediction(&reconciled).unwrap();

    // Confirmed predictions are no longer due.
    assert!(store.due_predictions("u", today).unwrap().is_empty());
}

#[test]
fn risk_upsert_supersedes_prior_active_row() {
    let store = StorageEngine::open_in_memory().unwrap();
    store.upsert_risk(&assessment("u", "migraine", 0.4)).unwrap();
    store.upsert_risk(&assessment("u", "migraine", 0.6)).unwrap();
    store.upsert_risk(&assessment("u", "fatigue", 0.3)).unwrap();

    let active = store.active_risks("u").unwrap();
    assert_eq!(active.len(), 2);
    let migraine = active.iter().find(|a| a.risk_type == "migraine").unwrap();
    assert!((migraine.risk_score.value() - 0.6).abs() < 1e-9);
    assert_eq!(migraine.contributing_factors.len(), 1);
}

#[test]
fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vital.db");
    {
        let store = StorageEngine::open(&path).unwrap();
        store.upsert_correlation(&correlation("u", 1, 0.8)).unwrap();
        assert_eq!(store.schema_version().unwrap(), 1);
    }
    let reopened = StorageEngine::open(&path).unwrap();
    assert_eq!(reopened.correlations_for("u", 30).unwrap().len(), 1);
}

// ── In-memory series store ───────────────────────────────────────────────

#[test]
fn offset_store_keeps_late_evening_observations_in_the_local_day() {
    // 23:30 UTC on Feb 28 is already Mar 1 at UTC+60min. An offset-aware
    // store must window and reduce it under Mar 1, like the aligner does.
    let store = MemorySeriesStore::with_offset(60);
    store.ingest_nutrition(&NutritionEntry {
        user_id: "u".into(),
        timestamp: "2026-02-28T23:30:00Z".parse().unwrap(),
        nutrient_name: "total_sugar_g".into(),
        value: 40.0,
        unit: "g".into(),
    });

    let window = DateWindow::new(
        "2026-03-01".parse().unwrap(),
        "2026-03-03".parse().unwrap(),
    )
    .unwrap();
    let fetched = store
        .fetch_series("u", "nutrition.total_sugar_g", window)
        .unwrap();
    assert_eq!(fetched.len(), 1);

    let value = store
        .observed_value("u", "nutrition.total_sugar_g", "2026-03-01".parse().unwrap())
        .unwrap();
    assert_eq!(value, Some(40.0));

    // At UTC day boundaries the same observation stays on Feb 28.
    let utc_store = MemorySeriesStore::new();
    utc_store.ingest_nutrition(&NutritionEntry {
        user_id: "u".into(),
        timestamp: "2026-02-28T23:30:00Z".parse().unwrap(),
        nutrient_name: "total_sugar_g".into(),
        value: 40.0,
        unit: "g".into(),
    });
    assert!(utc_store
        .fetch_series("u", "nutrition.total_sugar_g", window)
        .unwrap()
        .is_empty());
}

#[test]
fn memory_store_ingests_and_windows() {
    let store = MemorySeriesStore::new();
    for (i, value) in [80.0, 90.0, 85.0].iter().enumerate() {
        store.ingest_nutrition(&NutritionEntry {
            user_id: "u".into(),
            timestamp: format!("2026-03-0{}T12:00:00Z", i + 1).parse().unwrap(),
            nutrient_name: "total_sugar_g".into(),
            value: *value,
            unit: "g".into(),
        });
    }
    store.ingest_symptom(&SymptomJournalEntry {
        user_id: "u".into(),
        date: "2026-03-02".parse().unwrap(),
        symptom_type: "migraine".into(),
        severity: 6,
        triggers: vec![],
        associated_symptoms: vec![],
    });

    let variables = store.variables_for("u").unwrap();
    assert_eq!(
        variables,
        vec![
            "nutrition.total_sugar_g".to_string(),
            "symptom.migraine.severity".to_string()
        ]
    );

    let window = DateWindow::new(
        "2026-03-02".parse().unwrap(),
        "2026-03-05".parse().unwrap(),
    )
    .unwrap();
    let series = store
        .fetch_series("u", "nutrition.total_sugar_g", window)
        .unwrap();
    // The Mar 1 entry falls outside the window.
    assert_eq!(series.len(), 2);
}

#[test]
fn observed_value_reduces_by_family_policy() {
    let store = MemorySeriesStore::new();
    let day: NaiveDate = "2026-03-02".parse().unwrap();
    for value in [30.0, 50.0] {
        store.ingest_nutrition(&NutritionEntry {
            user_id: "u".into(),
            timestamp: "2026-03-02T10:00:00Z".parse().unwrap(),
            nutrient_name: "total_sugar_g".into(),
            value,
            unit: "g".into(),
        });
    }
    // Nutrition sums within a day.
    assert_eq!(
        store
            .observed_value("u", "nutrition.total_sugar_g", day)
            .unwrap(),
        Some(80.0)
    );
    assert_eq!(
        store
            .observed_value("u", "nutrition.total_sugar_g", day + Duration::days(1))
            .unwrap(),
        None
    );
}

#[test]
fn unavailable_variable_errors_without_affecting_others() {
    let store = MemorySeriesStore::new();
    store.ingest_nutrition(&NutritionEntry {
        user_id: "u".into(),
        timestamp: "2026-03-02T10:00:00Z".parse().unwrap(),
        nutrient_name: "total_sugar_g".into(),
        value: 80.0,
        unit: "g".into(),
    });
    store.mark_unavailable("nutrition.total_sugar_g");

    let window = DateWindow::new(
        "2026-03-01".parse().unwrap(),
        "2026-03-05".parse().unwrap(),
    )
    .unwrap();
    let err = store
        .fetch_series("u", "nutrition.total_sugar_g", window)
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable { .. }));
    assert!(err.is_transient());

    store.mark_available("nutrition.total_sugar_g");
    assert_eq!(
        store
            .fetch_series("u", "nutrition.total_sugar_g", window)
            .unwrap()
            .len(),
        1
    );
}

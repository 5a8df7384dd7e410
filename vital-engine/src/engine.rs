//! AnalysisEngine — the cache-wrapped facade over the pipeline and the
//! out-of-band operations (reconciliation, feedback, purges).

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;

use vital_cache::ResultCache;
use vital_core::models::{AnalysisSnapshot, CacheStatus, RiskAssessment, TriggerPattern};
use vital_core::traits::{IResultStore, ISeriesStore};
use vital_core::{AnalysisScope, VitalConfig, VitalResult};
use vital_forecast::{reconcile, ReconcileOutcome};
use vital_trigger::{apply_feedback, Feedback};

use crate::pipeline;

pub struct AnalysisEngine<S: ISeriesStore, R: IResultStore> {
    series_store: S,
    result_store: R,
    config: VitalConfig,
    cache: ResultCache<AnalysisSnapshot>,
    /// Cache keys issued per user, so feedback can invalidate every scope
    /// a user has cached.
    keys_by_user: DashMap<String, HashSet<String>>,
}

impl<S: ISeriesStore, R: IResultStore> AnalysisEngine<S, R> {
    pub fn new(series_store: S, result_store: R, config: VitalConfig) -> Self {
        let cache = ResultCache::new(&config.cache);
        Self {
            series_store,
            result_store,
            config,
            cache,
            keys_by_user: DashMap::new(),
        }
    }

    pub fn config(&self) -> &VitalConfig {
        &self.config
    }

    /// Full insights for a scope. Served from cache when fresh; otherwise
    /// computed at most once concurrently per scope, with stale results
    /// served to followers while the recompute runs.
    pub fn insights(
        &self,
        scope: &AnalysisScope,
    ) -> VitalResult<(AnalysisSnapshot, CacheStatus)> {
        let key = scope.cache_key();
        self.keys_by_user
            .entry(scope.user_id.clone())
            .or_default()
            .insert(key.clone());
        self.cache.get_or_compute(&key, || {
            pipeline::run(
                &self.series_store,
                &self.result_store,
                &self.config,
                scope,
                Utc::now(),
            )
        })
    }

    /// Cache freshness for a scope, for "recalculating" indicators.
    pub fn status(&self, scope: &AnalysisScope) -> Option<CacheStatus> {
        self.cache.status(&scope.cache_key())
    }

    /// Reconcile pending predictions whose date has passed. Returns how
    /// many predictions transitioned. Idempotent: predictions already
    /// reconciled are conflicts and left untouched; days with no
    /// observation yet stay pending for a later sweep.
    pub fn reconcile_due(&self, user_id: &str, today: NaiveDate) -> VitalResult<usize> {
        let due = self.result_store.due_predictions(user_id, today)?;
        let mut transitioned = 0;
        for mut prediction in due {
            let actual = match self.series_store.observed_value(
                user_id,
                &prediction.metric,
                prediction.prediction_date,
            ) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(
                        prediction_id = %prediction.id,
                        metric = %prediction.metric,
                        error = %e,
                        "actual lookup failed, will retry next sweep"
                    );
                    continue;
                }
            };
            // The stored interval encodes the metric's residual spread at
            // forecast time; recover it for the acceptance band.
            let half_width = (prediction.range.upper - prediction.range.lower) / 2.0;
            let historical_std = half_width / self.config.forecast.interval_z.max(f64::EPSILON);

            match reconcile(&mut prediction, actual, historical_std, &self.config.forecast) {
                ReconcileOutcome::Confirmed | ReconcileOutcome::Inaccurate => {
                    self.result_store.update_prediction(&prediction)?;
                    transitioned += 1;
                }
                ReconcileOutcome::AlreadyReconciled => {
                    tracing::warn!(
                        prediction_id = %prediction.id,
                        "reconciliation conflict, leaving prediction untouched"
                    );
                }
                ReconcileOutcome::NoObservation => {
                    tracing::debug!(
                        prediction_id = %prediction.id,
                        metric = %prediction.metric,
                        "no observation yet for prediction date"
                    );
                }
            }
        }
        if transitioned > 0 {
            tracing::info!(user_id, transitioned, "reconciliation sweep complete");
        }
        Ok(transitioned)
    }

    /// Fold explicit user feedback into a pattern and persist it. Returns
    /// the updated pattern, or None if the pattern does not exist for this
    /// user. Cached insights for the user are invalidated.
    pub fn apply_pattern_feedback(
        &self,
        user_id: &str,
        pattern_id: &str,
        feedback: Feedback,
    ) -> VitalResult<Option<TriggerPattern>> {
        let Some(pattern) = self.result_store.get_pattern(pattern_id)? else {
            return Ok(None);
        };
        if pattern.user_id != user_id {
            return Ok(None);
        }
        let updated = apply_feedback(&pattern, feedback, &self.config.trigger);
        self.result_store.upsert_pattern(&updated)?;
        self.invalidate_user(user_id);
        tracing::info!(
            pattern_id,
            confidence = %updated.confidence,
            times_validated = updated.times_validated,
            "pattern feedback applied"
        );
        Ok(Some(updated))
    }

    /// Delete correlations past their advisory expiry.
    pub fn purge_expired(&self) -> VitalResult<usize> {
        Ok(self.result_store.purge_expired_correlations(Utc::now())?)
    }

    /// Active risk assessments straight from the store (no pipeline run).
    pub fn active_risks(&self, user_id: &str) -> VitalResult<Vec<RiskAssessment>> {
        Ok(self.result_store.active_risks(user_id)?)
    }

    fn invalidate_user(&self, user_id: &str) {
        if let Some(keys) = self.keys_by_user.get(user_id) {
            for key in keys.iter() {
                self.cache.invalidate(key);
            }
        }
    }
}

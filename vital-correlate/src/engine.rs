//! CorrelationEngine — pair×lag scan over an aligned variable set.

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;

use vital_core::config::CorrelationConfig;
use vital_core::constants::MAX_LAG_DAYS;
use vital_core::models::{AlignedSeries, CorrelationKey, CorrelationResult};
use vital_core::AnalysisScope;

use crate::classify::{classify_magnitude, classify_type};
use crate::lag::lagged_pairs;
use crate::stats::{pearson, two_tailed_p};

/// Scans ordered variable pairs across candidate lags.
pub struct CorrelationEngine {
    config: CorrelationConfig,
}

impl CorrelationEngine {
    /// `max_lag_days` is clamped to [`MAX_LAG_DAYS`]; the pair×lag fan-out
    /// is quadratic in variables and linear in lags, so an oversized config
    /// value must not blow up the scan.
    pub fn new(mut config: CorrelationConfig) -> Self {
        if config.max_lag_days > MAX_LAG_DAYS {
            tracing::warn!(
                configured = config.max_lag_days,
                ceiling = MAX_LAG_DAYS,
                "max_lag_days exceeds the scan ceiling, clamping"
            );
            config.max_lag_days = MAX_LAG_DAYS;
        }
        Self { config }
    }

    /// Correlate one (predictor, outcome) pair at one lag.
    ///
    /// None means "insufficient data" (below minimum paired days, or a
    /// degenerate sample) — a normal outcome, distinct from zero
    /// correlation, and never recorded as a result.
    pub fn correlate_pair(
        &self,
        predictor: &AlignedSeries,
        outcome: &AlignedSeries,
        lag_days: u32,
        now: DateTime<Utc>,
    ) -> Option<CorrelationResult> {
        let (xs, ys) = lagged_pairs(predictor, outcome, lag_days);
        let sample_size = xs.len();
        if sample_size < self.config.min_sample_size {
            tracing::debug!(
                predictor = %predictor.variable,
                outcome = %outcome.variable,
                lag_days,
                sample_size,
                min = self.config.min_sample_size,
                "insufficient paired days, no result"
            );
            return None;
        }

        let coefficient = pearson(&xs, &ys)?;
        let p_value = two_tailed_p(coefficient, sample_size);
        let analysis_period_days = predictor.window.num_days() as u32;

        Some(CorrelationResult {
            id: uuid::Uuid::new_v4().to_string(),
            key: CorrelationKey {
                user_id: predictor.user_id.clone(),
                variable_a: predictor.variable.clone(),
                variable_b: outcome.variable.clone(),
                lag_days,
                analysis_period_days,
            },
            coefficient,
            p_value,
            sample_size,
            effect_type: classify_type(coefficient, &self.config),
            effect_magnitude: classify_magnitude(coefficient, &self.config),
            computed_at: now,
            expires_at: now + Duration::seconds(self.config.result_ttl_secs as i64),
        })
    }

    /// Scan all ordered pairs (a ≠ b) across lags 0..=max_lag_days.
    ///
    /// Series below the quality floor are skipped entirely rather than
    /// silently correlated. Pairs are independent, so the fan-out runs on
    /// the rayon pool; results are collected before trigger detection.
    pub fn scan(
        &self,
        series: &[AlignedSeries],
        scope: &AnalysisScope,
        quality_floor: f64,
        now: DateTime<Utc>,
    ) -> Vec<CorrelationResult> {
        let usable: Vec<&AlignedSeries> = series
            .iter()
            .filter(|s| {
                let keep = !s.is_low_quality(quality_floor);
                if !keep {
                    tracing::debug!(variable = %s.variable, quality = %s.data_quality, "skipping low-quality series");
                }
                keep
            })
            .collect();

        let mut tasks: Vec<(usize, usize, u32)> = Vec::new();
        for a in 0..usable.len() {
            for b in 0..usable.len() {
                if a == b {
                    continue;
                }
                for lag in 0..=self.config.max_lag_days {
                    tasks.push((a, b, lag));
                }
            }
        }

        let results: Vec<CorrelationResult> = tasks
            .par_iter()
            .filter_map(|&(a, b, lag)| self.correlate_pair(usable[a], usable[b], lag, now))
            .collect();

        tracing::debug!(
            user_id = %scope.user_id,
            candidates = tasks.len(),
            produced = results.len(),
            "correlation scan complete"
        );
        results
    }
}

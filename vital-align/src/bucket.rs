//! Calendar-day bucketing and per-family daily reduction.

use vital_core::config::AlignConfig;
use vital_core::models::{AlignedSeries, DailyReduction, Observation, VariableFamily};
use vital_core::DateWindow;

pub use vital_core::models::local_day;

use crate::quality::quality_score;

/// Reduce one day's observations to a single value by family policy.
fn reduce_day(values: &[f64], policy: DailyReduction) -> f64 {
    match policy {
        DailyReduction::Sum => values.iter().sum(),
        DailyReduction::Mean => values.iter().sum::<f64>() / values.len() as f64,
        DailyReduction::Max => values.iter().copied().fold(f64::MIN, f64::max),
    }
}

/// Align one variable's observations into a dense day-indexed series.
///
/// Days with zero observations are explicit `None`s; days with multiple
/// observations reduce by the family's policy. Observations outside the
/// window are dropped.
pub fn align_series(
    user_id: &str,
    variable: &str,
    family: VariableFamily,
    observations: &[&Observation],
    window: DateWindow,
    config: &AlignConfig,
) -> AlignedSeries {
    let total_days = window.num_days();
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); total_days];

    for obs in observations {
        let day = local_day(obs.timestamp, config.utc_offset_minutes);
        if let Some(index) = window.index_of(day) {
            buckets[index].push(obs.value);
        }
    }

    let policy = family.daily_reduction();
    let points: Vec<Option<f64>> = buckets
        .iter()
        .map(|values| {
            if values.is_empty() {
                None
            } else {
                Some(reduce_day(values, policy))
            }
        })
        .collect();

    let data_quality = quality_score(&points);
    if data_quality.value() < config.quality_floor {
        tracing::debug!(
            variable,
            quality = %data_quality,
            floor = config.quality_floor,
            "series below quality floor, flagged for downstream skip"
        );
    }

    AlignedSeries {
        user_id: user_id.to_string(),
        variable: variable.to_string(),
        family,
        window,
        points,
        data_quality,
    }
}

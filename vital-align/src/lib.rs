//! # vital-align
//!
//! Turns heterogeneous raw observations into day-indexed, gap-annotated
//! series per variable. Missing days stay explicit (never interpolated) so
//! downstream lag shifting preserves calendar alignment, and correlation
//! runs on paired-available-days only.

mod bucket;
mod quality;

pub use bucket::{align_series, local_day};
pub use quality::quality_score;

use vital_core::config::AlignConfig;
use vital_core::models::{AlignedSeries, Observation, VariableFamily};
use vital_core::DateWindow;

/// Align a batch of variables in one pass.
///
/// Observations are grouped by variable; variables with an unknown
/// namespace prefix are skipped with a warning and reported back so the
/// caller can mark the run partial.
pub fn align_all(
    user_id: &str,
    observations: &[Observation],
    window: DateWindow,
    config: &AlignConfig,
) -> (Vec<AlignedSeries>, Vec<String>) {
    use std::collections::BTreeMap;

    let mut by_variable: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        by_variable.entry(obs.variable.as_str()).or_default().push(obs);
    }

    let mut series = Vec::with_capacity(by_variable.len());
    let mut skipped = Vec::new();
    for (variable, obs) in by_variable {
        match VariableFamily::of_variable(variable) {
            Some(family) => {
                series.push(align_series(user_id, variable, family, &obs, window, config));
            }
            None => {
                tracing::warn!(variable, "unknown variable family, excluding from analysis");
                skipped.push(variable.to_string());
            }
        }
    }
    (series, skipped)
}

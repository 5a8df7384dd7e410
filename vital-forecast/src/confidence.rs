//! Forecast confidence: a multiplicative factor formula.
//!
//! ```text
//! confidence = qualityFactor × stabilityFactor × horizonFactor
//! ```
//!
//! Quality tracks the series' data_quality score, stability is the inverse
//! of relative volatility, and the horizon factor decays with days ahead.
//! Result is clamped to [0.0, 1.0]. Sparser or noisier input always
//! lowers confidence — the calibration contract of the forecast module.

use vital_core::models::{AlignedSeries, Score};

use crate::trend::TrendFit;

/// Each factor individually, for observability and tests.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceBreakdown {
    pub quality: f64,
    pub stability: f64,
    pub horizon: f64,
    pub final_confidence: f64,
}

fn quality_factor(series: &AlignedSeries) -> f64 {
    series.data_quality.value()
}

fn stability_factor(series: &AlignedSeries, fit: &TrendFit) -> f64 {
    let mean = series.mean().unwrap_or(0.0);
    1.0 - fit.relative_volatility(mean)
}

fn horizon_factor(horizon_days: u32) -> f64 {
    // 1.0 at horizon 0, ~0.5 at two weeks out.
    14.0 / (14.0 + f64::from(horizon_days))
}

/// Compute forecast confidence with a full breakdown.
pub fn forecast_confidence(
    series: &AlignedSeries,
    fit: &TrendFit,
    horizon_days: u32,
) -> ConfidenceBreakdown {
    let quality = quality_factor(series);
    let stability = stability_factor(series, fit);
    let horizon = horizon_factor(horizon_days);
    let final_confidence = Score::new(quality * stability * horizon).value();
    ConfidenceBreakdown {
        quality,
        stability,
        horizon,
        final_confidence,
    }
}

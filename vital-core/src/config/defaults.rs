//! Default values for every configurable threshold.

// Alignment
pub const DEFAULT_QUALITY_FLOOR: f64 = 0.5;
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 0;

// Correlation
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 5;
pub const DEFAULT_MAX_LAG_DAYS: u32 = 3;
pub const DEFAULT_NEUTRAL_EPSILON: f64 = 0.05;
pub const DEFAULT_MODERATE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_LARGE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_RESULT_TTL_SECS: u64 = 7 * 24 * 3600;

// Trigger detection
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.3;
pub const DEFAULT_CONFIRM_BOOST: f64 = 0.15;
pub const DEFAULT_REJECT_PENALTY: f64 = 0.2;
pub const DEFAULT_MIN_CONFIDENCE_FLOOR: f64 = 0.05;
pub const DEFAULT_MAX_MISSED_CYCLES: u32 = 3;
pub const DEFAULT_OBSERVATIONS_FOR_FULL_CONFIDENCE: u32 = 5;

// Forecast
pub const DEFAULT_HORIZONS: [u32; 5] = [1, 3, 7, 14, 30];
pub const DEFAULT_INTERVAL_Z: f64 = 1.96;
pub const DEFAULT_ACCURACY_BAND_SIGMA: f64 = 1.0;
pub const DEFAULT_MIN_ACCURACY_BAND: f64 = 8.0;
pub const DEFAULT_MIN_FIT_POINTS: usize = 5;
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 14.0;

// Risk
pub const DEFAULT_MODERATE_CUT: f64 = 0.25;
pub const DEFAULT_HIGH_CUT: f64 = 0.5;
pub const DEFAULT_CRITICAL_CUT: f64 = 0.75;
pub const DEFAULT_TREND_WEIGHT: f64 = 0.35;
pub const DEFAULT_TRIGGER_WEIGHT: f64 = 0.4;
pub const DEFAULT_FORECAST_WEIGHT: f64 = 0.25;

// Cache
pub const DEFAULT_CACHE_TTL_SECS: u64 = 6 * 3600;
pub const DEFAULT_INFLIGHT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_MAX_CACHE_ENTRIES: u64 = 10_000;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Aligner/resampler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// data_quality floor below which a series is flagged and skipped by
    /// the correlation scan. The series is still produced.
    pub quality_floor: f64,
    /// User-local timezone as a fixed offset from UTC, in minutes.
    /// The engine does not own user profiles; callers supply the offset.
    pub utc_offset_minutes: i32,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            quality_floor: defaults::DEFAULT_QUALITY_FLOOR,
            utc_offset_minutes: defaults::DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

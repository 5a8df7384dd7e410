/// Vital engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of candidate lags the correlation scan will accept.
/// Guards against quadratic pair scans exploding with pathological configs.
pub const MAX_LAG_DAYS: u32 = 14;

/// Maximum analysis window length in days.
pub const MAX_WINDOW_DAYS: i64 = 365;

/// Variable namespace prefixes, one per source family.
pub const PREFIX_NUTRITION: &str = "nutrition";
pub const PREFIX_WEARABLE: &str = "wearable";
pub const PREFIX_SYMPTOM: &str = "symptom";
pub const PREFIX_MEDICATION: &str = "medication";
pub const PREFIX_LAB: &str = "lab";

use serde::{Deserialize, Serialize};

use super::defaults;

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL of live entries.
    pub ttl_secs: u64,
    /// Self-expiry of an in-flight compute lease. A worker that crashes
    /// mid-computation holds leadership at most this long before another
    /// caller may reclaim the key.
    pub inflight_timeout_secs: u64,
    /// Capacity of the live tier.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            inflight_timeout_secs: defaults::DEFAULT_INFLIGHT_TIMEOUT_SECS,
            max_entries: defaults::DEFAULT_MAX_CACHE_ENTRIES,
        }
    }
}

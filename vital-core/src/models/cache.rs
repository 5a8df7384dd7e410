use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Freshness of a served result, exposed to consumers so they can decide
/// whether to show a "recalculating" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheStatus {
    /// Entry is live and within its TTL.
    Fresh,
    /// Entry is past its TTL and being served while a refresh runs.
    StaleServing,
    /// No value exists yet; a computation is in flight.
    Computing,
}

/// A cached result with its computation and expiry timestamps.
/// Expiry is advisory staleness, not a correctness invariant — reading an
/// expired entry is safe and only triggers refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub computed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, computed_at: DateTime<Utc>, ttl_secs: u64) -> Self {
        Self {
            value,
            computed_at,
            expires_at: computed_at + chrono::Duration::seconds(ttl_secs as i64),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

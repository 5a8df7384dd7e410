//! Two-tier result cache.
//!
//! The live tier (moka, TTL-evicted) answers `Fresh`. The stale tier
//! (dashmap, unbounded TTL) keeps the last computed value past expiry so
//! followers of an in-flight recompute can be served immediately with a
//! `StaleServing` marker instead of blocking.

use std::time::Duration;

use chrono::Utc;
use moka::sync::Cache;

use vital_core::config::CacheConfig;
use vital_core::models::{CacheEntry, CacheStatus};
use vital_core::{VitalError, VitalResult};

use crate::singleflight::{FlightGroup, FlightOutcome, FlightRole};

pub struct ResultCache<T: Clone + Send + Sync + 'static> {
    live: Cache<String, CacheEntry<T>>,
    stale: dashmap::DashMap<String, CacheEntry<T>>,
    flights: FlightGroup,
    ttl_secs: u64,
}

impl<T: Clone + Send + Sync + 'static> ResultCache<T> {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            live: Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(Duration::from_secs(config.ttl_secs))
                .build(),
            stale: dashmap::DashMap::new(),
            flights: FlightGroup::new(Duration::from_secs(config.inflight_timeout_secs)),
            ttl_secs: config.ttl_secs,
        }
    }

    /// Read without computing.
    pub fn get(&self, key: &str) -> Option<(T, CacheStatus)> {
        if let Some(entry) = self.live.get(key) {
            return Some((entry.value, CacheStatus::Fresh));
        }
        self.stale
            .get(key)
            .map(|entry| (entry.value.clone(), CacheStatus::StaleServing))
    }

    /// Freshness of the key as a consumer would experience it right now.
    pub fn status(&self, key: &str) -> Option<CacheStatus> {
        if self.flights.in_flight(key) {
            return Some(CacheStatus::Computing);
        }
        if self.live.contains_key(key) {
            return Some(CacheStatus::Fresh);
        }
        if self.stale.contains_key(key) {
            return Some(CacheStatus::StaleServing);
        }
        None
    }

    /// Serve the key, computing at most once concurrently.
    ///
    /// Live hit → `Fresh`. Miss with a stale value → the first caller
    /// recomputes while later callers are served the stale value as
    /// `StaleServing`. Miss with no value at all → the first caller
    /// recomputes and later callers block for its result.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> VitalResult<(T, CacheStatus)>
    where
        F: FnOnce() -> VitalResult<T>,
    {
        if let Some(entry) = self.live.get(key) {
            return Ok((entry.value, CacheStatus::Fresh));
        }

        match self.flights.enter(key) {
            FlightRole::Leader(guard) => {
                tracing::debug!(key, "cache miss, computing");
                match compute() {
                    Ok(value) => {
                        let entry = CacheEntry::new(value.clone(), Utc::now(), self.ttl_secs);
                        self.live.insert(key.to_string(), entry.clone());
                        self.stale.insert(key.to_string(), entry);
                        self.flights.complete(guard, true);
                        Ok((value, CacheStatus::Fresh))
                    }
                    Err(e) => {
                        self.flights.complete(guard, false);
                        Err(e)
                    }
                }
            }
            FlightRole::Follower(handle) => {
                // A previous value, however old, beats blocking.
                if let Some(entry) = self.stale.get(key) {
                    tracing::debug!(key, "recompute in flight, serving stale");
                    return Ok((entry.value.clone(), CacheStatus::StaleServing));
                }
                match handle.wait(self.flights.lease()) {
                    FlightOutcome::LeaderSucceeded => match self.get(key) {
                        Some(hit) => Ok(hit),
                        None => Err(VitalError::CacheCompute {
                            key: key.to_string(),
                            reason: "leader result evicted before read".to_string(),
                        }),
                    },
                    FlightOutcome::LeaderFailed => Err(VitalError::CacheCompute {
                        key: key.to_string(),
                        reason: "in-flight computation failed".to_string(),
                    }),
                    FlightOutcome::TimedOut => Err(VitalError::CacheCompute {
                        key: key.to_string(),
                        reason: "in-flight computation exceeded its lease".to_string(),
                    }),
                }
            }
        }
    }

    /// Drop both tiers for a key. Used when the underlying results are
    /// known to have changed (e.g. after user feedback).
    pub fn invalidate(&self, key: &str) {
        self.live.invalidate(key);
        self.stale.remove(key);
    }

    /// Drop the live entry only, so the next read recomputes while the
    /// last value remains available for stale serving.
    pub fn expire(&self, key: &str) {
        self.live.invalidate(key);
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use vital_cache::ResultCache;
use vital_core::config::CacheConfig;
use vital_core::models::CacheStatus;
use vital_core::{VitalError, VitalResult};

fn config() -> CacheConfig {
    CacheConfig {
        ttl_secs: 3600,
        inflight_timeout_secs: 5,
        max_entries: 100,
    }
}

#[test]
fn hit_and_miss_basics() {
    let cache: ResultCache<String> = ResultCache::new(&config());
    assert!(cache.get("k").is_none());
    assert_eq!(cache.status("k"), None);

    let (value, status) = cache
        .get_or_compute("k", || Ok("v1".to_string()))
        .unwrap();
    assert_eq!(value, "v1");
    assert_eq!(status, CacheStatus::Fresh);

    // Second read never recomputes.
    let (value, status) = cache
        .get_or_compute("k", || -> VitalResult<String> {
            panic!("must not recompute a fresh key")
        })
        .unwrap();
    assert_eq!(value, "v1");
    assert_eq!(status, CacheStatus::Fresh);
    assert_eq!(cache.status("k"), Some(CacheStatus::Fresh));
}

#[test]
fn concurrent_misses_compute_exactly_once() {
    let cache: Arc<ResultCache<u64>> = Arc::new(ResultCache::new(&config()));
    let computes = Arc::new(AtomicUsize::new(0));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let mut handles = Vec::new();
    for _ in 0..threads {
        let cache = cache.clone();
        let computes = computes.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            cache.get_or_compute("user:scope", || {
                computes.fetch_add(1, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(200));
                Ok(42)
            })
        }));
    }

    for handle in handles {
        let (value, _status) = handle.join().unwrap().unwrap();
        assert_eq!(value, 42);
    }
    assert_eq!(computes.load(Ordering::SeqCst), 1);
}

#[test]
fn followers_with_a_prior_value_are_served_stale() {
    let cache: Arc<ResultCache<u64>> = Arc::new(ResultCache::new(&config()));
    cache.get_or_compute("k", || Ok(1)).unwrap();
    cache.expire("k");

    let leader = {
        let cache = cache.clone();
        thread::spawn(move || {
            cache.get_or_compute("k", || {
                thread::sleep(Duration::from_millis(300));
                Ok(2)
            })
        })
    };

    // Give the leader time to take the ticket, then read concurrently.
    thread::sleep(Duration::from_millis(50));
    assert_eq!(cache.status("k"), Some(CacheStatus::Computing));
    let (value, status) = cache
        .get_or_compute("k", || -> VitalResult<u64> {
            panic!("follower must not compute")
        })
        .unwrap();
    assert_eq!(value, 1);
    assert_eq!(status, CacheStatus::StaleServing);

    let (value, status) = leader.join().unwrap().unwrap();
    assert_eq!(value, 2);
    assert_eq!(status, CacheStatus::Fresh);
    assert_eq!(cache.status("k"), Some(CacheStatus::Fresh));
}

#[test]
fn expired_entry_is_served_as_stale_not_dropped() {
    let cache: ResultCache<u64> = ResultCache::new(&config());
    cache.get_or_compute("k", || Ok(7)).unwrap();
    cache.expire("k");

    assert_eq!(cache.get("k"), Some((7, CacheStatus::StaleServing)));
    assert_eq!(cache.status("k"), Some(CacheStatus::StaleServing));
}

#[test]
fn compute_failure_propagates_and_caches_nothing() {
    let cache: ResultCache<u64> = ResultCache::new(&config());
    let err = cache
        .get_or_compute("k", || {
            Err(VitalError::Config {
                reason: "boom".into(),
            })
        })
        .unwrap_err();
    assert!(matches!(err, VitalError::Config { .. }));
    assert!(cache.get("k").is_none());

    // The key is not poisoned; the next caller computes.
    let (value, status) = cache.get_or_compute("k", || Ok(9)).unwrap();
    assert_eq!(value, 9);
    assert_eq!(status, CacheStatus::Fresh);
}

#[test]
fn invalidate_drops_both_tiers() {
    let cache: ResultCache<u64> = ResultCache::new(&config());
    cache.get_or_compute("k", || Ok(1)).unwrap();
    cache.invalidate("k");
    assert!(cache.get("k").is_none());
    assert_eq!(cache.status("k"), None);
}

#[test]
fn keys_do_not_interfere() {
    let cache: ResultCache<u64> = ResultCache::new(&config());
    cache.get_or_compute("a", || Ok(1)).unwrap();
    cache.get_or_compute("b", || Ok(2)).unwrap();
    cache.invalidate("a");
    assert!(cache.get("a").is_none());
    assert_eq!(cache.get("b"), Some((2, CacheStatus::Fresh)));
}

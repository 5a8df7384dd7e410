//! Per-key single-flight tickets.
//!
//! The first caller for a key becomes the leader and computes; later
//! callers become followers and can wait for the leader's outcome. A
//! ticket older than the lease is considered abandoned (its worker
//! crashed or hung) and leadership is reclaimed by the next caller.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

const STATE_RUNNING: u8 = 0;
const STATE_SUCCEEDED: u8 = 1;
const STATE_FAILED: u8 = 2;

struct Flight {
    state: AtomicU8,
    lock: Mutex<()>,
    cv: Condvar,
    started: Instant,
}

impl Flight {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_RUNNING),
            lock: Mutex::new(()),
            cv: Condvar::new(),
            started: Instant::now(),
        }
    }
}

/// What a follower learned by waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightOutcome {
    /// The leader finished and published its result.
    LeaderSucceeded,
    /// The leader finished with an error.
    LeaderFailed,
    /// The lease ran out before the leader finished.
    TimedOut,
}

/// Role assigned to a caller entering a key.
pub enum FlightRole {
    /// This caller computes. Must call [`FlightGroup::complete`] when done.
    Leader(FlightGuard),
    /// Another caller is computing; wait on the handle if needed.
    Follower(FollowerHandle),
}

/// Leader-side handle tying completion back to the key.
pub struct FlightGuard {
    key: String,
    flight: Arc<Flight>,
}

/// Follower-side handle for waiting on the leader.
pub struct FollowerHandle {
    flight: Arc<Flight>,
}

impl FollowerHandle {
    /// Block until the leader completes or the remaining lease elapses.
    pub fn wait(&self, lease: Duration) -> FlightOutcome {
        let deadline = self.flight.started + lease;
        let mut guard = match self.flight.lock.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        loop {
            match self.flight.state.load(Ordering::Acquire) {
                STATE_SUCCEEDED => return FlightOutcome::LeaderSucceeded,
                STATE_FAILED => return FlightOutcome::LeaderFailed,
                _ => {}
            }
            let now = Instant::now();
            if now >= deadline {
                return FlightOutcome::TimedOut;
            }
            let (g, _timeout) = match self.flight.cv.wait_timeout(guard, deadline - now) {
                Ok(r) => r,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard = g;
        }
    }
}

/// The single-flight ticket map.
pub struct FlightGroup {
    flights: DashMap<String, Arc<Flight>>,
    lease: Duration,
}

impl FlightGroup {
    pub fn new(lease: Duration) -> Self {
        Self {
            flights: DashMap::new(),
            lease,
        }
    }

    pub fn lease(&self) -> Duration {
        self.lease
    }

    /// Enter a key: leader if no live ticket exists (or the existing one
    /// has exceeded its lease), follower otherwise.
    pub fn enter(&self, key: &str) -> FlightRole {
        match self.flights.entry(key.to_string()) {
            Entry::Vacant(vacant) => {
                let flight = Arc::new(Flight::new());
                vacant.insert(flight.clone());
                FlightRole::Leader(FlightGuard {
                    key: key.to_string(),
                    flight,
                })
            }
            Entry::Occupied(mut occupied) => {
                let flight = occupied.get().clone();
                if flight.started.elapsed() > self.lease {
                    // Abandoned ticket: reclaim leadership under the
                    // entry lock.
                    tracing::warn!(key, "reclaiming expired in-flight lease");
                    let fresh = Arc::new(Flight::new());
                    *occupied.get_mut() = fresh.clone();
                    FlightRole::Leader(FlightGuard {
                        key: key.to_string(),
                        flight: fresh,
                    })
                } else {
                    FlightRole::Follower(FollowerHandle { flight })
                }
            }
        }
    }

    /// Whether a compute is currently in flight for the key.
    pub fn in_flight(&self, key: &str) -> bool {
        self.flights
            .get(key)
            .is_some_and(|f| f.started.elapsed() <= self.lease)
    }

    /// Leader completion: publish the outcome, wake followers, retire the
    /// ticket.
    pub fn complete(&self, guard: FlightGuard, success: bool) {
        let state = if success { STATE_SUCCEEDED } else { STATE_FAILED };
        guard.flight.state.store(state, Ordering::Release);
        {
            let _g = match guard.flight.lock.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.flight.cv.notify_all();
        }
        self.flights
            .remove_if(&guard.key, |_, f| Arc::ptr_eq(f, &guard.flight));
    }
}

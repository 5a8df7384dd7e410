//! # vital-cache
//!
//! TTL'd result cache with two guarantees consumers rely on:
//!
//! - **At-most-one concurrent recompute per key.** A second caller arriving
//!   while a recompute is in flight either blocks for the leader's result
//!   or is served the last valid value, never triggers a duplicate compute.
//! - **Expiry is advisory.** An expired entry is stale-but-valid; it is
//!   served with a `StaleServing` marker while the refresh proceeds.
//!
//! In-flight leases self-expire, so a worker that dies mid-computation
//! holds leadership for a bounded time rather than deadlocking the key.

mod engine;
mod singleflight;

pub use engine::ResultCache;
pub use singleflight::{FlightGroup, FlightOutcome, FlightRole};

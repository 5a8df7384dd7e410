//! # vital-trigger
//!
//! Promotes repeated significant correlations into trigger-pattern
//! hypotheses, refines them with recency-weighted updates and explicit user
//! feedback, and deactivates patterns that stop recurring.
//!
//! All state transitions are pure reducer functions over
//! `(existing pattern, new evidence)` so the update rules are testable in
//! isolation from storage.

mod eligibility;
mod engine;
mod reducer;

pub use eligibility::is_trigger_eligible;
pub use engine::{DetectorEngine, DetectionOutcome};
pub use reducer::{apply_feedback, observe, sweep_missed, CandidateObservation, Feedback};

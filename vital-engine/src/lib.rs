//! # vital-engine
//!
//! Orchestration: runs the per-scope analysis pipeline
//! (fetch → align → correlate → {trigger, forecast} → risk), persists every
//! result family, and fronts it all with the single-flight result cache.
//! Also hosts the operations that run outside a pipeline pass:
//! reconciliation of due predictions, pattern feedback, and expiry purges.

mod engine;
pub mod pipeline;

pub use engine::AnalysisEngine;
pub use vital_trigger::Feedback;

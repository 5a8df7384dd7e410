//! # vital-core
//!
//! Foundation crate for the vital health-analytics engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::VitalConfig;
pub use errors::{StoreError, VitalError, VitalResult};
pub use models::{AlignedSeries, AnalysisScope, DateWindow, Observation, Score, VariableFamily};

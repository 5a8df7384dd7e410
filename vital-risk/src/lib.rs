//! # vital-risk
//!
//! Aggregates per-metric trend lines, active trigger patterns, and
//! near-horizon forecasts into `RiskAssessment` records per category.
//! Every assessment carries contributing factors that reference the
//! concrete records behind it, so a score is always explainable.

mod engine;
mod factors;
mod level;

pub use engine::RiskEngine;
pub use factors::{Component, FactorSeed};
pub use level::level_for;

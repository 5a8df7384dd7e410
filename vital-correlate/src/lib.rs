//! # vital-correlate
//!
//! Correlation engine: for each candidate (predictor, outcome, lag) triple
//! it intersects the two aligned series on paired non-missing days, computes
//! the Pearson coefficient with a two-tailed t-distribution p-value, and
//! classifies effect sign and magnitude.
//!
//! This crate is a scanning primitive, not a significance gate — p-values
//! are reported as computed per pair, and the trigger detector applies the
//! stricter multiple-comparison-aware threshold before anything becomes
//! user-visible.

mod classify;
mod engine;
mod lag;
mod stats;

pub use classify::{classify_magnitude, classify_type};
pub use engine::CorrelationEngine;
pub use lag::lagged_pairs;
pub use stats::{pearson, two_tailed_p};

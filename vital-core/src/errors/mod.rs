//! Error taxonomy for the vital engine.
//!
//! Statistical "no result" conditions (insufficient overlap, degenerate
//! variance) are never errors — they are represented as absence of a result.
//! The error types here cover store access, invalid inputs, and cache
//! coordination failures only.

mod store_error;

pub use store_error::StoreError;

/// Top-level error for the vital engine.
#[derive(Debug, thiserror::Error)]
pub enum VitalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid analysis window: {reason}")]
    InvalidWindow { reason: String },

    #[error("cache compute for key '{key}' failed: {reason}")]
    CacheCompute { key: String, reason: String },

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result alias used across the workspace.
pub type VitalResult<T> = Result<T, VitalError>;

//! # vital-storage
//!
//! Durable storage for computed results (SQLite via `rusqlite`) and an
//! in-memory `ISeriesStore` adapter holding raw observations, used as the
//! reference implementation and test double for external series sources.

pub mod engine;
pub mod memory;
pub mod migrations;
pub mod queries;

pub use engine::StorageEngine;
pub use memory::MemorySeriesStore;

use vital_core::StoreError;

pub(crate) fn to_store_err(message: impl Into<String>) -> StoreError {
    StoreError::Sqlite {
        message: message.into(),
    }
}

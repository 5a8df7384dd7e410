//! Trait seams between the engine and its external stores.

mod result_store;
mod series_store;

pub use result_store::IResultStore;
pub use series_store::ISeriesStore;

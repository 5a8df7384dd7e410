//! Raw SQL operations, one module per result family.

pub mod correlation_ops;
pub mod prediction_ops;
pub mod risk_ops;
pub mod trigger_ops;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use vital_core::StoreError;

use crate::to_store_err;

/// Unit enums persist under their serde spelling (snake_case text).
pub(crate) fn enum_to_text<T: Serialize>(value: &T) -> Result<String, StoreError> {
    let json = serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })?;
    Ok(json.trim_matches('"').to_string())
}

pub(crate) fn enum_from_text<T: DeserializeOwned>(text: &str) -> Result<T, StoreError> {
    serde_json::from_str(&format!("\"{text}\"")).map_err(|e| StoreError::Serialization {
        message: format!("{text}: {e}"),
    })
}

pub(crate) fn json_to_text<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })
}

pub(crate) fn json_from_text<T: DeserializeOwned>(text: &str) -> Result<T, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Serialization {
        message: e.to_string(),
    })
}

pub(crate) fn datetime_to_text(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

pub(crate) fn datetime_from_text(text: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_store_err(format!("bad timestamp {text}: {e}")))
}

pub(crate) fn date_from_text(text: &str) -> Result<NaiveDate, StoreError> {
    text.parse()
        .map_err(|e| to_store_err(format!("bad date {text}: {e}")))
}

//! Raw SQL operations for the predictions table.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use vital_core::models::{Prediction, PredictionRange, Score};
use vital_core::StoreError;

use super::{
    date_from_text, datetime_from_text, datetime_to_text, enum_from_text, enum_to_text,
};
use crate::to_store_err;

const COLUMNS: &str = "id, user_id, prediction_type, metric, prediction_date, horizon_days,
    predicted_value, confidence, range_lower, range_upper, actual_value, prediction_error,
    status, created_at";

pub fn insert(conn: &Connection, prediction: &Prediction) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO predictions (
            id, user_id, prediction_type, metric, prediction_date, horizon_days,
            predicted_value, confidence, range_lower, range_upper, actual_value,
            prediction_error, status, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            prediction.id,
            prediction.user_id,
            enum_to_text(&prediction.prediction_type)?,
            prediction.metric,
            prediction.prediction_date.to_string(),
            prediction.horizon_days,
            prediction.predicted_value,
            prediction.confidence.value(),
            prediction.range.lower,
            prediction.range.upper,
            prediction.actual_value,
            prediction.prediction_error,
            enum_to_text(&prediction.status)?,
            datetime_to_text(prediction.created_at),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Write back a reconciled prediction's outcome fields.
pub fn update(conn: &Connection, prediction: &Prediction) -> Result<(), StoreError> {
    conn.execute(
        "UPDATE predictions
         SET actual_value = ?2, prediction_error = ?3, status = ?4
         WHERE id = ?1",
        params![
            prediction.id,
            prediction.actual_value,
            prediction.prediction_error,
            enum_to_text(&prediction.status)?,
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

struct RawPrediction {
    id: String,
    user_id: String,
    prediction_type: String,
    metric: String,
    prediction_date: String,
    horizon_days: u32,
    predicted_value: f64,
    confidence: f64,
    range_lower: f64,
    range_upper: f64,
    actual_value: Option<f64>,
    prediction_error: Option<f64>,
    status: String,
    created_at: String,
}

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawPrediction> {
    Ok(RawPrediction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        prediction_type: row.get(2)?,
        metric: row.get(3)?,
        prediction_date: row.get(4)?,
        horizon_days: row.get(5)?,
        predicted_value: row.get(6)?,
        confidence: row.get(7)?,
        range_lower: row.get(8)?,
        range_upper: row.get(9)?,
        actual_value: row.get(10)?,
        prediction_error: row.get(11)?,
        status: row.get(12)?,
        created_at: row.get(13)?,
    })
}

fn decode(raw: RawPrediction) -> Result<Prediction, StoreError> {
    Ok(Prediction {
        id: raw.id,
        user_id: raw.user_id,
        prediction_type: enum_from_text(&raw.prediction_type)?,
        metric: raw.metric,
        prediction_date: date_from_text(&raw.prediction_date)?,
        horizon_days: raw.horizon_days,
        predicted_value: raw.predicted_value,
        confidence: Score::new(raw.confidence),
        range: PredictionRange {
            lower: raw.range_lower,
            upper: raw.range_upper,
        },
        actual_value: raw.actual_value,
        prediction_error: raw.prediction_error,
        status: enum_from_text(&raw.status)?,
        created_at: datetime_from_text(&raw.created_at)?,
    })
}

/// Pending predictions whose date is on or before `as_of`.
pub fn due(
    conn: &Connection,
    user_id: &str,
    as_of: NaiveDate,
) -> Result<Vec<Prediction>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM predictions
         WHERE user_id = ?1 AND status = 'pending' AND prediction_date <= ?2
         ORDER BY prediction_date"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id, as_of.to_string()], raw_from_row)
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut predictions = Vec::new();
    for row in rows {
        predictions.push(decode(row.map_err(|e| to_store_err(e.to_string()))?)?);
    }
    Ok(predictions)
}

//! Raw SQL operations for the correlations table.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use vital_core::models::{CorrelationKey, CorrelationResult};
use vital_core::StoreError;

use super::{datetime_from_text, datetime_to_text, enum_from_text, enum_to_text};
use crate::to_store_err;

/// Insert or replace the row for the result's logical key. Recomputation
/// refreshes the stats and `expires_at` in place, never appends.
pub fn upsert(conn: &Connection, result: &CorrelationResult) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO correlations (
            id, user_id, variable_a, variable_b, lag_days, analysis_period_days,
            coefficient, p_value, sample_size, effect_type, effect_magnitude,
            computed_at, expires_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
         ON CONFLICT (user_id, variable_a, variable_b, lag_days, analysis_period_days)
         DO UPDATE SET
            coefficient = excluded.coefficient,
            p_value = excluded.p_value,
            sample_size = excluded.sample_size,
            effect_type = excluded.effect_type,
            effect_magnitude = excluded.effect_magnitude,
            computed_at = excluded.computed_at,
            expires_at = excluded.expires_at",
        params![
            result.id,
            result.key.user_id,
            result.key.variable_a,
            result.key.variable_b,
            result.key.lag_days,
            result.key.analysis_period_days,
            result.coefficient,
            result.p_value,
            result.sample_size as i64,
            enum_to_text(&result.effect_type)?,
            enum_to_text(&result.effect_magnitude)?,
            datetime_to_text(result.computed_at),
            datetime_to_text(result.expires_at),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

/// Row as stored, before text fields are decoded.
struct RawCorrelation {
    id: String,
    user_id: String,
    variable_a: String,
    variable_b: String,
    lag_days: u32,
    analysis_period_days: u32,
    coefficient: f64,
    p_value: f64,
    sample_size: i64,
    effect_type: String,
    effect_magnitude: String,
    computed_at: String,
    expires_at: String,
}

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawCorrelation> {
    Ok(RawCorrelation {
        id: row.get(0)?,
        user_id: row.get(1)?,
        variable_a: row.get(2)?,
        variable_b: row.get(3)?,
        lag_days: row.get(4)?,
        analysis_period_days: row.get(5)?,
        coefficient: row.get(6)?,
        p_value: row.get(7)?,
        sample_size: row.get(8)?,
        effect_type: row.get(9)?,
        effect_magnitude: row.get(10)?,
        computed_at: row.get(11)?,
        expires_at: row.get(12)?,
    })
}

fn decode(raw: RawCorrelation) -> Result<CorrelationResult, StoreError> {
    Ok(CorrelationResult {
        id: raw.id,
        key: CorrelationKey {
            user_id: raw.user_id,
            variable_a: raw.variable_a,
            variable_b: raw.variable_b,
            lag_days: raw.lag_days,
            analysis_period_days: raw.analysis_period_days,
        },
        coefficient: raw.coefficient,
        p_value: raw.p_value,
        sample_size: raw.sample_size as usize,
        effect_type: enum_from_text(&raw.effect_type)?,
        effect_magnitude: enum_from_text(&raw.effect_magnitude)?,
        computed_at: datetime_from_text(&raw.computed_at)?,
        expires_at: datetime_from_text(&raw.expires_at)?,
    })
}

/// All stored correlations for a user at one analysis period.
pub fn for_user(
    conn: &Connection,
    user_id: &str,
    analysis_period_days: u32,
) -> Result<Vec<CorrelationResult>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, variable_a, variable_b, lag_days, analysis_period_days,
                    coefficient, p_value, sample_size, effect_type, effect_magnitude,
                    computed_at, expires_at
             FROM correlations
             WHERE user_id = ?1 AND analysis_period_days = ?2
             ORDER BY variable_a, variable_b, lag_days",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id, analysis_period_days], raw_from_row)
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(decode(row.map_err(|e| to_store_err(e.to_string()))?)?);
    }
    Ok(results)
}

/// Delete correlations past their advisory expiry. Returns the count.
pub fn purge_expired(conn: &Connection, now: DateTime<Utc>) -> Result<usize, StoreError> {
    conn.execute(
        "DELETE FROM correlations WHERE expires_at < ?1",
        params![datetime_to_text(now)],
    )
    .map_err(|e| to_store_err(e.to_string()))
}

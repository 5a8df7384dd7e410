//! Raw SQL operations for the trigger_patterns table.

use rusqlite::{params, Connection, Row};

use vital_core::models::{Score, TriggerPattern};
use vital_core::StoreError;

use super::{
    datetime_from_text, datetime_to_text, enum_from_text, enum_to_text, json_from_text,
    json_to_text,
};
use crate::to_store_err;

const COLUMNS: &str = "id, user_id, symptom_type, pattern_type, trigger_variables,
    pattern_strength, confidence, trigger_threshold, times_observed, times_validated,
    last_observed_at, is_active, user_acknowledged, missed_cycles, created_at";

/// Insert or replace a pattern by id. Detection rewrites the whole row; the
/// reducer has already folded the prior state in.
pub fn upsert(conn: &Connection, pattern: &TriggerPattern) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO trigger_patterns (
            id, user_id, symptom_type, pattern_type, trigger_variables,
            pattern_strength, confidence, trigger_threshold, times_observed,
            times_validated, last_observed_at, is_active, user_acknowledged,
            missed_cycles, created_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
         ON CONFLICT (id) DO UPDATE SET
            symptom_type = excluded.symptom_type,
            pattern_type = excluded.pattern_type,
            trigger_variables = excluded.trigger_variables,
            pattern_strength = excluded.pattern_strength,
            confidence = excluded.confidence,
            trigger_threshold = excluded.trigger_threshold,
            times_observed = excluded.times_observed,
            times_validated = excluded.times_validated,
            last_observed_at = excluded.last_observed_at,
            is_active = excluded.is_active,
            user_acknowledged = excluded.user_acknowledged,
            missed_cycles = excluded.missed_cycles",
        params![
            pattern.id,
            pattern.user_id,
            pattern.symptom_type,
            enum_to_text(&pattern.pattern_type)?,
            json_to_text(&pattern.trigger_variables)?,
            pattern.pattern_strength.value(),
            pattern.confidence.value(),
            pattern.trigger_threshold,
            pattern.times_observed,
            pattern.times_validated,
            datetime_to_text(pattern.last_observed_at),
            pattern.is_active,
            pattern.user_acknowledged,
            pattern.missed_cycles,
            datetime_to_text(pattern.created_at),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

struct RawPattern {
    id: String,
    user_id: String,
    symptom_type: String,
    pattern_type: String,
    trigger_variables: String,
    pattern_strength: f64,
    confidence: f64,
    trigger_threshold: f64,
    times_observed: u32,
    times_validated: u32,
    last_observed_at: String,
    is_active: bool,
    user_acknowledged: bool,
    missed_cycles: u32,
    created_at: String,
}

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawPattern> {
    Ok(RawPattern {
        id: row.get(0)?,
        user_id: row.get(1)?,
        symptom_type: row.get(2)?,
        pattern_type: row.get(3)?,
        trigger_variables: row.get(4)?,
        pattern_strength: row.get(5)?,
        confidence: row.get(6)?,
        trigger_threshold: row.get(7)?,
        times_observed: row.get(8)?,
        times_validated: row.get(9)?,
        last_observed_at: row.get(10)?,
        is_active: row.get(11)?,
        user_acknowledged: row.get(12)?,
        missed_cycles: row.get(13)?,
        created_at: row.get(14)?,
    })
}

fn decode(raw: RawPattern) -> Result<TriggerPattern, StoreError> {
    Ok(TriggerPattern {
        id: raw.id,
        user_id: raw.user_id,
        symptom_type: raw.symptom_type,
        pattern_type: enum_from_text(&raw.pattern_type)?,
        trigger_variables: json_from_text(&raw.trigger_variables)?,
        pattern_strength: Score::new(raw.pattern_strength),
        confidence: Score::new(raw.confidence),
        trigger_threshold: raw.trigger_threshold,
        times_observed: raw.times_observed,
        times_validated: raw.times_validated,
        last_observed_at: datetime_from_text(&raw.last_observed_at)?,
        is_active: raw.is_active,
        user_acknowledged: raw.user_acknowledged,
        missed_cycles: raw.missed_cycles,
        created_at: datetime_from_text(&raw.created_at)?,
    })
}

pub fn get(conn: &Connection, id: &str) -> Result<Option<TriggerPattern>, StoreError> {
    let sql = format!("SELECT {COLUMNS} FROM trigger_patterns WHERE id = ?1");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![id], raw_from_row)
        .map_err(|e| to_store_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(decode(row.map_err(|e| to_store_err(e.to_string()))?)?)),
        None => Ok(None),
    }
}

/// All patterns for a user, active and deactivated.
pub fn for_user(conn: &Connection, user_id: &str) -> Result<Vec<TriggerPattern>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM trigger_patterns WHERE user_id = ?1 ORDER BY created_at"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], raw_from_row)
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut patterns = Vec::new();
    for row in rows {
        patterns.push(decode(row.map_err(|e| to_store_err(e.to_string()))?)?);
    }
    Ok(patterns)
}

//! Raw SQL operations for the risk_assessments table.

use rusqlite::{params, Connection, Row};

use vital_core::models::{RiskAssessment, Score};
use vital_core::{DateWindow, StoreError};

use super::{
    date_from_text, datetime_from_text, datetime_to_text, enum_from_text, enum_to_text,
    json_from_text, json_to_text,
};
use crate::to_store_err;

const COLUMNS: &str = "id, user_id, category, risk_type, risk_score, risk_level,
    window_start, window_end, contributing_factors, is_active, assessed_at";

/// Deactivate prior active rows for the same (user, category, risk_type).
/// History is preserved; superseded rows are never deleted or mutated
/// beyond the active flag.
pub fn deactivate_prior(
    conn: &Connection,
    assessment: &RiskAssessment,
) -> Result<usize, StoreError> {
    conn.execute(
        "UPDATE risk_assessments
         SET is_active = 0
         WHERE user_id = ?1 AND category = ?2 AND risk_type = ?3 AND is_active = 1",
        params![
            assessment.user_id,
            enum_to_text(&assessment.category)?,
            assessment.risk_type,
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))
}

pub fn insert(conn: &Connection, assessment: &RiskAssessment) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO risk_assessments (
            id, user_id, category, risk_type, risk_score, risk_level,
            window_start, window_end, contributing_factors, is_active, assessed_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            assessment.id,
            assessment.user_id,
            enum_to_text(&assessment.category)?,
            assessment.risk_type,
            assessment.risk_score.value(),
            enum_to_text(&assessment.risk_level)?,
            assessment.risk_window.start.to_string(),
            assessment.risk_window.end.to_string(),
            json_to_text(&assessment.contributing_factors)?,
            assessment.is_active,
            datetime_to_text(assessment.assessed_at),
        ],
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(())
}

struct RawRisk {
    id: String,
    user_id: String,
    category: String,
    risk_type: String,
    risk_score: f64,
    risk_level: String,
    window_start: String,
    window_end: String,
    contributing_factors: String,
    is_active: bool,
    assessed_at: String,
}

fn raw_from_row(row: &Row<'_>) -> rusqlite::Result<RawRisk> {
    Ok(RawRisk {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        risk_type: row.get(3)?,
        risk_score: row.get(4)?,
        risk_level: row.get(5)?,
        window_start: row.get(6)?,
        window_end: row.get(7)?,
        contributing_factors: row.get(8)?,
        is_active: row.get(9)?,
        assessed_at: row.get(10)?,
    })
}

fn decode(raw: RawRisk) -> Result<RiskAssessment, StoreError> {
    let window = DateWindow::new(
        date_from_text(&raw.window_start)?,
        date_from_text(&raw.window_end)?,
    )
    .map_err(|e| to_store_err(e.to_string()))?;
    Ok(RiskAssessment {
        id: raw.id,
        user_id: raw.user_id,
        category: enum_from_text(&raw.category)?,
        risk_type: raw.risk_type,
        risk_score: Score::new(raw.risk_score),
        risk_level: enum_from_text(&raw.risk_level)?,
        risk_window: window,
        contributing_factors: json_from_text(&raw.contributing_factors)?,
        is_active: raw.is_active,
        assessed_at: datetime_from_text(&raw.assessed_at)?,
    })
}

/// Active assessments for a user across all categories.
pub fn active_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<RiskAssessment>, StoreError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM risk_assessments
         WHERE user_id = ?1 AND is_active = 1
         ORDER BY assessed_at"
    );
    let mut stmt = conn.prepare(&sql).map_err(|e| to_store_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id], raw_from_row)
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut assessments = Vec::new();
    for row in rows {
        assessments.push(decode(row.map_err(|e| to_store_err(e.to_string()))?)?);
    }
    Ok(assessments)
}

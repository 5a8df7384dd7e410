//! Data-quality scoring: observed_days / total_days.

use vital_core::models::Score;

/// Quality of a dense day-indexed series. Empty windows score 0.
pub fn quality_score(points: &[Option<f64>]) -> Score {
    if points.is_empty() {
        return Score::ZERO;
    }
    let observed = points.iter().filter(|p| p.is_some()).count();
    Score::new(observed as f64 / points.len() as f64)
}

//! Lag shifting and pairwise-complete intersection.

use vital_core::models::AlignedSeries;

/// Pair predictor day t with outcome day t + lag, keeping only days where
/// both series have a real value (pairwise-complete-observations policy —
/// no imputation, ever).
///
/// Returns `(predictor_values, outcome_values)` in day order. At lag 0
/// this is the plain intersection; the relation is asymmetric for lag > 0.
pub fn lagged_pairs(
    predictor: &AlignedSeries,
    outcome: &AlignedSeries,
    lag_days: u32,
) -> (Vec<f64>, Vec<f64>) {
    let lag = lag_days as usize;
    let len = predictor.points.len().min(outcome.points.len());
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    if lag >= len {
        return (xs, ys);
    }

    for t in 0..len - lag {
        if let (Some(x), Some(y)) = (predictor.points[t], outcome.points[t + lag]) {
            xs.push(x);
            ys.push(y);
        }
    }
    (xs, ys)
}

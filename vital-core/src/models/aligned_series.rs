use serde::{Deserialize, Serialize};

use super::{DateWindow, Score, VariableFamily};

/// A day-indexed, gap-explicit series for one variable over a window.
///
/// `points[i]` holds the reduced daily value for `window.date_at(i)`, or
/// None for days with no observation. Missing days are explicit so lag
/// shifting preserves calendar alignment across variables; they are never
/// interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub user_id: String,
    pub variable: String,
    pub family: VariableFamily,
    pub window: DateWindow,
    pub points: Vec<Option<f64>>,
    /// observed_days / total_days.
    pub data_quality: Score,
}

impl AlignedSeries {
    /// Number of days carrying a real value.
    pub fn observed_days(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Iterate `(day_index, value)` over observed days only.
    pub fn observed(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.map(|v| (i, v)))
    }

    /// Whether this series falls below the given quality floor.
    pub fn is_low_quality(&self, floor: f64) -> bool {
        self.data_quality.value() < floor
    }

    /// Mean of observed values. None when no days are observed.
    pub fn mean(&self) -> Option<f64> {
        let n = self.observed_days();
        if n == 0 {
            return None;
        }
        Some(self.observed().map(|(_, v)| v).sum::<f64>() / n as f64)
    }

    /// Population standard deviation of observed values.
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let n = self.observed_days();
        let var = self
            .observed()
            .map(|(_, v)| (v - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        Some(var.sqrt())
    }
}

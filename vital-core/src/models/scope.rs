use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{VitalError, VitalResult};

/// An inclusive calendar-day range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Build a window, rejecting inverted or oversized ranges.
    pub fn new(start: NaiveDate, end: NaiveDate) -> VitalResult<Self> {
        if end < start {
            return Err(VitalError::InvalidWindow {
                reason: format!("end {end} precedes start {start}"),
            });
        }
        let days = (end - start).num_days() + 1;
        if days > constants::MAX_WINDOW_DAYS {
            return Err(VitalError::InvalidWindow {
                reason: format!("{days} days exceeds maximum {}", constants::MAX_WINDOW_DAYS),
            });
        }
        Ok(Self { start, end })
    }

    /// Number of days in the window, inclusive of both endpoints.
    pub fn num_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Index of a date within the window, or None if outside.
    pub fn index_of(&self, day: NaiveDate) -> Option<usize> {
        if day < self.start || day > self.end {
            return None;
        }
        Some((day - self.start).num_days() as usize)
    }

    /// Date at a given index (must be < num_days).
    pub fn date_at(&self, index: usize) -> NaiveDate {
        self.start + chrono::Duration::days(index as i64)
    }

    /// Iterate every day in the window.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.num_days()).map(|i| self.date_at(i))
    }
}

/// Explicit per-run analysis scope. Threaded through every stage — there is
/// no ambient "current window" state anywhere in the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnalysisScope {
    pub user_id: String,
    pub window: DateWindow,
}

impl AnalysisScope {
    pub fn new(user_id: impl Into<String>, window: DateWindow) -> Self {
        Self {
            user_id: user_id.into(),
            window,
        }
    }

    /// Length of the analysis window in days. This is the
    /// `analysis_period_days` component of correlation result keys.
    pub fn analysis_period_days(&self) -> u32 {
        self.window.num_days() as u32
    }

    /// Stable cache key for this scope.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.user_id, self.window.start, self.window.end
        )
    }
}

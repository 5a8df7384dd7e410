use chrono::NaiveDate;

use crate::errors::StoreError;
use crate::models::{DateWindow, Observation};

/// Read-only access to a user's raw observations.
///
/// Implementations own transport concerns: the fetch should be issued with
/// a bounded timeout, surfacing `StoreError::Timeout`/`Unavailable` on
/// failure. Fetches are per variable so one source's outage excludes only
/// its variables from a run (partial-result degradation), never the whole
/// pipeline.
pub trait ISeriesStore: Send + Sync {
    /// All variable names tracked for a user.
    fn variables_for(&self, user_id: &str) -> Result<Vec<String>, StoreError>;

    /// Raw observations for one variable over a window.
    fn fetch_series(
        &self,
        user_id: &str,
        variable: &str,
        window: DateWindow,
    ) -> Result<Vec<Observation>, StoreError>;

    /// The observed daily value for a variable on a single day, reduced by
    /// the variable's family policy. Used by forecast reconciliation.
    fn observed_value(
        &self,
        user_id: &str,
        variable: &str,
        day: NaiveDate,
    ) -> Result<Option<f64>, StoreError>;
}

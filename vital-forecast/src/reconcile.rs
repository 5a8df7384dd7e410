//! Reconciliation of pending predictions against observed actuals.
//!
//! One-way, idempotent: only `Pending` predictions transition, exactly
//! once, to `Confirmed` or `Inaccurate`. Re-running on an already
//! reconciled row is a no-op that changes nothing and double-counts
//! nothing.

use vital_core::config::ForecastConfig;
use vital_core::models::{Prediction, PredictionStatus};

/// Outcome of one reconciliation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Confirmed,
    Inaccurate,
    /// The prediction was not `Pending`. No fields were touched.
    AlreadyReconciled,
    /// No observation exists yet for the prediction date. Retry later.
    NoObservation,
}

/// Reconcile a prediction against the observed actual, in place.
///
/// `historical_std` is the metric's residual standard deviation at
/// forecast time; the acceptance band is
/// `max(min_accuracy_band, accuracy_band_sigma × historical_std)`.
pub fn reconcile(
    prediction: &mut Prediction,
    actual: Option<f64>,
    historical_std: f64,
    config: &ForecastConfig,
) -> ReconcileOutcome {
    if !prediction.is_pending() {
        return ReconcileOutcome::AlreadyReconciled;
    }
    let Some(actual_value) = actual else {
        return ReconcileOutcome::NoObservation;
    };

    let error = (prediction.predicted_value - actual_value).abs();
    let band = (config.accuracy_band_sigma * historical_std).max(config.min_accuracy_band);

    prediction.actual_value = Some(actual_value);
    prediction.prediction_error = Some(error);
    if error <= band {
        prediction.status = PredictionStatus::Confirmed;
        ReconcileOutcome::Confirmed
    } else {
        prediction.status = PredictionStatus::Inaccurate;
        ReconcileOutcome::Inaccurate
    }
}

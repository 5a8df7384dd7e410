//! # vital-forecast
//!
//! Point/interval forecasts for tracked metrics at several horizons, and
//! the later reconciliation of those forecasts against observed actuals.
//!
//! The forecasting method sits behind the [`Forecaster`] trait so it can be
//! swapped without changing the `Prediction` shape. The calibration
//! contract is fixed regardless of method: confidence correlates inversely
//! with input sparseness and volatility, and intervals widen with horizon.

mod confidence;
mod engine;
mod reconcile;
mod trend;

pub use confidence::{forecast_confidence, ConfidenceBreakdown};
pub use engine::{ForecastEngine, Forecaster, PointForecast, TrendForecaster};
pub use reconcile::{reconcile, ReconcileOutcome};
pub use trend::{fit_trend, TrendFit};

//! StorageEngine — owns the SQLite connection, runs migrations on open,
//! and implements `IResultStore` over the per-table query modules.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Connection;

use vital_core::models::{CorrelationResult, Prediction, RiskAssessment, TriggerPattern};
use vital_core::traits::IResultStore;
use vital_core::StoreError;

use crate::queries::{correlation_ops, prediction_ops, risk_ops, trigger_ops};
use crate::{migrations, to_store_err};

pub struct StorageEngine {
    conn: Mutex<Connection>,
}

impl StorageEngine {
    /// Open a file-backed store, creating and migrating it as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| to_store_err(e.to_string()))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| to_store_err(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| to_store_err(e.to_string()))?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut conn = match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut conn)
    }

    pub fn schema_version(&self) -> Result<u32, StoreError> {
        self.with_conn(|conn| migrations::current_version(conn))
    }
}

impl IResultStore for StorageEngine {
    fn upsert_correlation(&self, result: &CorrelationResult) -> Result<(), StoreError> {
        self.with_conn(|conn| correlation_ops::upsert(conn, result))
    }

    fn correlations_for(
        &self,
        user_id: &str,
        analysis_period_days: u32,
    ) -> Result<Vec<CorrelationResult>, StoreError> {
        self.with_conn(|conn| correlation_ops::for_user(conn, user_id, analysis_period_days))
    }

    fn purge_expired_correlations(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let purged = self.with_conn(|conn| correlation_ops::purge_expired(conn, now))?;
        if purged > 0 {
            tracing::info!(purged, "purged expired correlations");
        }
        Ok(purged)
    }

    fn upsert_pattern(&self, pattern: &TriggerPattern) -> Result<(), StoreError> {
        self.with_conn(|conn| trigger_ops::upsert(conn, pattern))
    }

    fn get_pattern(&self, id: &str) -> Result<Option<TriggerPattern>, StoreError> {
        self.with_conn(|conn| trigger_ops::get(conn, id))
    }

    fn patterns_for(&self, user_id: &str) -> Result<Vec<TriggerPattern>, StoreError> {
        self.with_conn(|conn| trigger_ops::for_user(conn, user_id))
    }

    fn insert_prediction(&self, prediction: &Prediction) -> Result<(), StoreError> {
        self.with_conn(|conn| prediction_ops::insert(conn, prediction))
    }

    fn due_predictions(
        &self,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Result<Vec<Prediction>, StoreError> {
        self.with_conn(|conn| prediction_ops::due(conn, user_id, as_of))
    }

    fn update_prediction(&self, prediction: &Prediction) -> Result<(), StoreError> {
        self.with_conn(|conn| prediction_ops::update(conn, prediction))
    }

    fn upsert_risk(&self, assessment: &RiskAssessment) -> Result<(), StoreError> {
        // Supersede and insert atomically so a reader never sees zero or
        // two active rows for the same (user, category, risk_type).
        self.with_conn(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| to_store_err(e.to_string()))?;
            risk_ops::deactivate_prior(&tx, assessment)?;
            risk_ops::insert(&tx, assessment)?;
            tx.commit().map_err(|e| to_store_err(e.to_string()))?;
            Ok(())
        })
    }

    fn active_risks(&self, user_id: &str) -> Result<Vec<RiskAssessment>, StoreError> {
        self.with_conn(|conn| risk_ops::active_for_user(conn, user_id))
    }
}

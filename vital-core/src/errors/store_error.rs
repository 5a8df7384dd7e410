/// Store-layer errors: series source access and result persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("source '{source_name}' unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("source '{source_name}' timed out after {elapsed_ms}ms")]
    Timeout { source_name: String, elapsed_ms: u64 },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },
}

impl StoreError {
    /// True when the failure is a transient source problem that should
    /// degrade to a partial result rather than abort the run.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}

//! # Store Error Types
//!
//! Errors for the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sqlx::Error / serde_json::Error / MigrateError                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ├──► logged and swallowed by the persisted stores (snapshots)   │
//! │       │                                                                 │
//! │       └──► ApiError in the app (startup, direct port access)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the database failed (bad path, permissions, disk full).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// All pooled connections are busy.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored value is not valid JSON for the expected type.
    #[error("Corrupt snapshot under '{key}': {message}")]
    CorruptSnapshot { key: String, message: String },

    /// Encoding a value to JSON failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn corrupt(key: impl Into<String>, err: &serde_json::Error) -> Self {
        StoreError::CorruptSnapshot {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

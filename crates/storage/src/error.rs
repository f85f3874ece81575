//! Typed error enum for the storage layer.
//!
//! Backend driver errors are classified on conversion, so callers can ask
//! `is_transient` without knowing which backend is compiled in.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// SQL / connection failure that retrying will not fix.
    #[error("database error: {0}")]
    Database(#[source] BoxError),

    /// Lock contention, pool exhaustion or a dropped connection.
    #[error("database busy: {0}")]
    Busy(#[source] BoxError),

    /// A `spawn_blocking` task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),

    /// Backend refused the operation (offline, injected failure).
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Schema setup failed.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Busy(_) | Self::Unavailable(_))
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

/// `SQLITE_BUSY` / `SQLITE_LOCKED` → `Busy`, everything else → `Database`.
#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                Self::Busy(Box::new(err))
            },
            _ => Self::Database(Box::new(err)),
        }
    }
}

/// Pool checkout only fails on timeout.
#[cfg(feature = "sqlite")]
impl From<r2d2::Error> for StorageError {
    fn from(err: r2d2::Error) -> Self {
        Self::Busy(Box::new(err))
    }
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => Self::Busy(Box::new(err)),
            _ => Self::Database(Box::new(err)),
        }
    }
}

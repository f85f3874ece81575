//! Unified storage backend with enum dispatch.

#[cfg(feature = "sqlite")]
use std::path::Path;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::traits::KeyValueStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Memory(s) => <MemoryStore as KeyValueStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::sqlite::SqliteStore as KeyValueStore>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStore as KeyValueStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(crate::sqlite::SqliteStore),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStore),
}

impl StorageBackend {
    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    #[cfg(feature = "sqlite")]
    pub fn new_sqlite(db_path: &Path) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::sqlite::SqliteStore::new(db_path)?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStore::new(database_url).await?))
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

#[async_trait]
impl KeyValueStore for StorageBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        dispatch!(self, get(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        dispatch!(self, set(key, value))
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        dispatch!(self, delete(key))
    }
}

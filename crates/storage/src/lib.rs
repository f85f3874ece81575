//! Storage layer for pokexp
//!
//! Async key-value stores holding serialized progress records: in-memory,
//! `SQLite` (default) and PostgreSQL, unified behind `StorageBackend`.

mod backend;
pub mod error;
mod memory;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;

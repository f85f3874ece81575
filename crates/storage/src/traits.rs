//! Storage backend trait abstraction
//!
//! Progress records are opaque strings under string keys; the service layer
//! owns key layout and serialization.

use async_trait::async_trait;

use crate::error::StorageError;

/// Minimal async key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Returns `true` if a value was removed.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;
}

//! Tests for the key-value backends.

use crate::{KeyValueStore, MemoryStore, StorageBackend, StorageError};

async fn exercise_store(store: &dyn KeyValueStore) {
    assert_eq!(store.get("progress:ash").await.unwrap(), None);

    store.set("progress:ash", r#"{"xp":50}"#).await.unwrap();
    assert_eq!(store.get("progress:ash").await.unwrap().as_deref(), Some(r#"{"xp":50}"#));

    store.set("progress:ash", r#"{"xp":100}"#).await.unwrap();
    assert_eq!(store.get("progress:ash").await.unwrap().as_deref(), Some(r#"{"xp":100}"#));
    assert_eq!(store.get("progress:misty").await.unwrap(), None);

    assert!(store.delete("progress:ash").await.unwrap());
    assert!(!store.delete("progress:ash").await.unwrap());
    assert_eq!(store.get("progress:ash").await.unwrap(), None);
}

#[tokio::test]
async fn memory_store_crud() {
    let store = MemoryStore::new();
    exercise_store(&store).await;
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn memory_store_injected_failures() {
    let store = MemoryStore::new();
    store.set("k", "v").await.unwrap();

    store.set_fail_reads(true);
    let err = store.get("k").await.unwrap_err();
    assert!(matches!(err, StorageError::Unavailable(_)));
    assert!(err.is_transient());

    store.set_fail_reads(false);
    store.set_fail_writes(true);
    assert!(store.set("k", "w").await.is_err());
    assert!(store.delete("k").await.is_err());
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn memory_clones_share_entries() {
    let store = MemoryStore::new();
    let other = store.clone();
    store.set("k", "v").await.unwrap();
    assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn backend_dispatches_to_memory() {
    let backend = StorageBackend::new_memory();
    assert_eq!(backend.kind(), "memory");
    exercise_store(&backend).await;
}

#[cfg(feature = "sqlite")]
mod sqlite_tests {
    use super::exercise_store;
    use crate::{KeyValueStore, SqliteStore, StorageBackend};
    use tempfile::TempDir;

    #[expect(clippy::unwrap_used, reason = "test code")]
    fn create_test_store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = SqliteStore::new(&temp_dir.path().join("test.db")).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn sqlite_store_crud() {
        let (store, _temp_dir) = create_test_store();
        exercise_store(&store).await;
    }

    #[tokio::test]
    async fn sqlite_store_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.db");
        {
            let store = SqliteStore::new(&path).unwrap();
            store.set("progress:brock", r#"{"xp":250}"#).await.unwrap();
        }
        let reopened = SqliteStore::new(&path).unwrap();
        assert_eq!(reopened.get("progress:brock").await.unwrap().as_deref(), Some(r#"{"xp":250}"#));
    }

    #[test]
    fn sqlite_sync_api() {
        let (store, _temp_dir) = create_test_store();
        store.set_sync("k", "v1").unwrap();
        store.set_sync("k", "v2").unwrap();
        assert_eq!(store.get_sync("k").unwrap().as_deref(), Some("v2"));
        assert!(store.delete_sync("k").unwrap());
    }

    #[tokio::test]
    async fn backend_dispatches_to_sqlite() {
        let temp_dir = TempDir::new().unwrap();
        let backend = StorageBackend::new_sqlite(&temp_dir.path().join("b.db")).unwrap();
        assert_eq!(backend.kind(), "sqlite");
        exercise_store(&backend).await;
    }
}

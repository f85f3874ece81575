//! Integration tests for PgStore.
//! Run with: DATABASE_URL=... cargo test -p pokexp-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use std::time::{SystemTime, UNIX_EPOCH};

use pokexp_storage::{KeyValueStore, PgStore};

async fn create_pg_store() -> PgStore {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStore integration tests");
    PgStore::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_key() -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("progress:test-{}-{nanos}", std::process::id())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_set_get_delete() {
    let store = create_pg_store().await;
    let key = unique_key();

    assert_eq!(store.get(&key).await.unwrap(), None);
    store.set(&key, r#"{"xp":50}"#).await.unwrap();
    store.set(&key, r#"{"xp":100}"#).await.unwrap();
    assert_eq!(store.get(&key).await.unwrap().as_deref(), Some(r#"{"xp":100}"#));
    assert!(store.delete(&key).await.unwrap());
    assert!(!store.delete(&key).await.unwrap());
}

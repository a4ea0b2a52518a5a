//! Key-value storage layer for the minimart client
//!
//! Every domain collection (accounts, addresses, orders, favorites) is
//! persisted as a single serialized blob under one key. The [`KvStore`]
//! trait is the only surface the domain layer sees; backends are
//! [`MemoryStore`] (non-durable, for tests and hermetic wiring) and
//! [`RedbStore`] (one redb database file per namespace).

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod disk;
mod memory;

pub use disk::RedbStore;
pub use memory::MemoryStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous key → string-blob store.
///
/// Calls are the only suspension points in the persistence layer; a
/// backend may block briefly (redb commits) but must never require a
/// second logical task to make progress.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the blob under `key`, `None` if the key was never written.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite the blob under `key`.
    async fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Make previous `put`s durable. No-op for backends that commit
    /// durably on `put`.
    async fn flush(&self) -> StoreResult<()>;
}

/// Typed full-collection adapter over a [`KvStore`].
///
/// A collection is always read and rewritten wholesale: `load` returns
/// the entire list (empty when the key is absent), `save` replaces it.
pub struct RecordStore<T> {
    store: Arc<dyn KvStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Load the whole collection under `key`. A key that was never
    /// written deserializes as the empty collection.
    pub async fn load(&self, key: &str) -> StoreResult<Vec<T>> {
        match self.store.get(key).await? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    /// Serialize and rewrite the whole collection under `key`, then
    /// flush the backend.
    pub async fn save(&self, key: &str, records: &[T]) -> StoreResult<()> {
        let blob = serde_json::to_string(records)?;
        self.store.put(key, &blob).await?;
        self.store.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u32,
        label: String,
    }

    fn entry(id: u32, label: &str) -> Entry {
        Entry {
            id,
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn load_missing_key_is_empty() {
        let records: RecordStore<Entry> = RecordStore::new(Arc::new(MemoryStore::new()));
        let loaded = records.load("entries_alice").await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trip() {
        let records: RecordStore<Entry> = RecordStore::new(Arc::new(MemoryStore::new()));

        records
            .save("entries_alice", &[entry(1, "one"), entry(2, "two")])
            .await
            .unwrap();

        let loaded = records.load("entries_alice").await.unwrap();
        assert_eq!(loaded, vec![entry(1, "one"), entry(2, "two")]);
    }

    #[tokio::test]
    async fn save_rewrites_wholesale() {
        let records: RecordStore<Entry> = RecordStore::new(Arc::new(MemoryStore::new()));

        records
            .save("entries_alice", &[entry(1, "one")])
            .await
            .unwrap();
        records
            .save("entries_alice", &[entry(3, "three")])
            .await
            .unwrap();

        let loaded = records.load("entries_alice").await.unwrap();
        assert_eq!(loaded, vec![entry(3, "three")]);
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let store = Arc::new(MemoryStore::new());
        let records: RecordStore<Entry> = RecordStore::new(store);

        records
            .save("entries_alice", &[entry(1, "one")])
            .await
            .unwrap();

        let other = records.load("entries_bob").await.unwrap();
        assert!(other.is_empty());
    }
}

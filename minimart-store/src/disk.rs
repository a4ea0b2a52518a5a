//! redb-backed store backend
//!
//! One database file per namespace, one table holding key → blob.
//! redb uses `Durability::Immediate` by default, so every committed
//! `put` is already persistent; `flush` has nothing left to do.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableDatabase, TableDefinition};

use crate::{KvStore, StoreResult};

/// Table for serialized collections: key = storage key, value = JSON blob
const RECORDS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("records");

/// Durable [`KvStore`] backed by a redb database file.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        tracing::debug!(path = %path.as_ref().display(), "opening store");
        let db = Database::create(path)?;

        // Create the table so first reads see an empty table instead
        // of a missing one.
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl KvStore for RedbStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        tracing::debug!(key = %key, bytes = value.len(), "writing blob");
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    async fn flush(&self) -> StoreResult<()> {
        // Commits are durable as soon as `commit()` returns.
        Ok(())
    }
}

//! In-memory store backend

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{KvStore, StoreResult};

/// Non-durable [`KvStore`] backed by a map.
///
/// Used by tests and by hermetic compositions that do not want a data
/// directory. Contents are lost when the process exits, which is the
/// same lifetime the session cart has.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob under `key`, for asserting that a failed operation left
    /// the stored collection byte-for-byte unchanged.
    pub fn dump(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn flush(&self) -> StoreResult<()> {
        Ok(())
    }
}

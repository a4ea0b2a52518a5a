//! Favorites Index
//!
//! Per-user favorited product ids under the `favorites` namespace.
//! Persisted as an ordered sequence but logically a set: no duplicate
//! entries, membership only.

use std::sync::Arc;

use minimart_store::{KvStore, RecordStore};
use parking_lot::RwLock;

use crate::catalog::Catalog;
use crate::error::{ServiceError, ServiceResult};
use crate::models::Product;

/// Manages one user's favorited product-id set.
#[derive(Default)]
pub struct FavoritesIndex {
    records: RwLock<Option<RecordStore<u32>>>,
}

fn storage_key(username: &str) -> String {
    format!("favorites_{username}")
}

impl FavoritesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        let index = Self::new();
        index.init(store);
        index
    }

    pub fn init(&self, store: Arc<dyn KvStore>) {
        *self.records.write() = Some(RecordStore::new(store));
    }

    fn records(&self) -> ServiceResult<RecordStore<u32>> {
        self.records
            .read()
            .clone()
            .ok_or(ServiceError::Uninitialized)
    }

    /// Favorited product ids, insertion order.
    pub async fn list(&self, username: &str) -> ServiceResult<Vec<u32>> {
        let ids = self.records()?.load(&storage_key(username)).await?;
        Ok(ids)
    }

    pub async fn contains(&self, username: &str, product_id: u32) -> ServiceResult<bool> {
        let ids = self.records()?.load(&storage_key(username)).await?;
        Ok(ids.contains(&product_id))
    }

    /// Append the id. `Ok(false)` when it was already present (no-op,
    /// not an error).
    pub async fn add(&self, username: &str, product_id: u32) -> ServiceResult<bool> {
        let records = self.records()?;
        let key = storage_key(username);
        let mut ids = records.load(&key).await?;

        if ids.contains(&product_id) {
            return Ok(false);
        }

        ids.push(product_id);
        records.save(&key, &ids).await?;
        Ok(true)
    }

    /// Remove the id. `Ok(false)` when it was absent.
    pub async fn remove(&self, username: &str, product_id: u32) -> ServiceResult<bool> {
        let records = self.records()?;
        let key = storage_key(username);
        let mut ids = records.load(&key).await?;

        let Some(index) = ids.iter().position(|id| *id == product_id) else {
            return Ok(false);
        };

        ids.remove(index);
        records.save(&key, &ids).await?;
        Ok(true)
    }

    /// Flip membership; returns the resulting state (true = now
    /// favorited). Not atomic against concurrent toggles for the same
    /// user: last write wins.
    pub async fn toggle(&self, username: &str, product_id: u32) -> ServiceResult<bool> {
        if self.contains(username, product_id).await? {
            self.remove(username, product_id).await?;
            Ok(false)
        } else {
            self.add(username, product_id).await?;
            Ok(true)
        }
    }

    /// Resolve the favorited ids against the catalog, skipping ids the
    /// catalog no longer carries.
    pub async fn products(&self, username: &str, catalog: &Catalog) -> ServiceResult<Vec<Product>> {
        let ids = self.list(username).await?;
        Ok(ids
            .into_iter()
            .filter_map(|id| catalog.get(id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimart_store::MemoryStore;

    fn index() -> FavoritesIndex {
        FavoritesIndex::with_store(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn add_is_set_like() {
        let index = index();

        assert!(index.add("alice", 3).await.unwrap());
        assert!(!index.add("alice", 3).await.unwrap(), "duplicate is a no-op");

        assert_eq!(index.list("alice").await.unwrap(), vec![3]);
        assert!(index.contains("alice", 3).await.unwrap());
    }

    #[tokio::test]
    async fn remove_absent_is_false() {
        let index = index();
        assert!(!index.remove("alice", 7).await.unwrap());

        index.add("alice", 7).await.unwrap();
        assert!(index.remove("alice", 7).await.unwrap());
        assert!(index.list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_is_an_involution() {
        let index = index();

        assert!(index.toggle("alice", 5).await.unwrap());
        assert!(index.contains("alice", 5).await.unwrap());

        assert!(!index.toggle("alice", 5).await.unwrap());
        assert!(!index.contains("alice", 5).await.unwrap());
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let index = index();
        for id in [4, 1, 9] {
            index.add("alice", id).await.unwrap();
        }
        assert_eq!(index.list("alice").await.unwrap(), vec![4, 1, 9]);
    }

    #[tokio::test]
    async fn products_skip_unknown_ids() {
        let index = index();
        let catalog = Catalog::builtin();

        index.add("alice", 1).await.unwrap();
        index.add("alice", 999).await.unwrap();

        let products = index.products("alice", &catalog).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let index = index();
        index.add("alice", 2).await.unwrap();
        assert!(index.list("bob").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn uninitialized_fails() {
        let index = FavoritesIndex::new();
        let err = index.list("alice").await.unwrap_err();
        assert!(matches!(err, ServiceError::Uninitialized));
    }
}

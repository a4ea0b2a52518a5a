//! Address Book
//!
//! Per-user shipping addresses under the `addresses` namespace, one
//! key per username. The single-default invariant is enforced by the
//! clear-all-then-set-one transform applied in memory before the one
//! persist call: because persistence is a full-collection overwrite,
//! two addresses can never be stored as default simultaneously.

use std::sync::Arc;

use minimart_store::{KvStore, RecordStore};
use parking_lot::RwLock;
use uuid::Uuid;

use super::validate;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Address, AddressDraft};

/// Manages one user's shipping addresses.
#[derive(Default)]
pub struct AddressBook {
    records: RwLock<Option<RecordStore<Address>>>,
}

fn storage_key(username: &str) -> String {
    format!("addresses_{username}")
}

fn generate_address_id() -> String {
    format!("addr-{}", Uuid::new_v4())
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        let book = Self::new();
        book.init(store);
        book
    }

    pub fn init(&self, store: Arc<dyn KvStore>) {
        *self.records.write() = Some(RecordStore::new(store));
    }

    fn records(&self) -> ServiceResult<RecordStore<Address>> {
        self.records
            .read()
            .clone()
            .ok_or(ServiceError::Uninitialized)
    }

    /// All addresses for the user, insertion order.
    pub async fn list(&self, username: &str) -> ServiceResult<Vec<Address>> {
        self.records()?.load(&storage_key(username)).await.map_err(Into::into)
    }

    /// Validate, stamp an id, and append. When the new address is
    /// default, every existing default flag is cleared first.
    pub async fn add(&self, username: &str, draft: AddressDraft) -> ServiceResult<Address> {
        validate::check_address(&draft.recipient_name, &draft.phone, &draft.full_address)?;

        let records = self.records()?;
        let key = storage_key(username);
        let mut addresses = records.load(&key).await?;

        if draft.is_default {
            for address in &mut addresses {
                address.is_default = false;
            }
        }

        let address = draft.into_address(generate_address_id(), username.to_string());
        tracing::debug!(username = %username, address_id = %address.id, "adding address");
        addresses.push(address.clone());
        records.save(&key, &addresses).await?;
        Ok(address)
    }

    /// Replace the matching record in place (position preserved).
    /// Fails with `NotFound` when no stored address has the same id.
    pub async fn update(&self, username: &str, address: Address) -> ServiceResult<()> {
        validate::check_address(
            &address.recipient_name,
            &address.phone,
            &address.full_address,
        )?;

        let records = self.records()?;
        let key = storage_key(username);
        let mut addresses = records.load(&key).await?;

        let index = addresses
            .iter()
            .position(|a| a.id == address.id)
            .ok_or_else(|| ServiceError::NotFound("address".to_string()))?;

        if address.is_default {
            for other in &mut addresses {
                other.is_default = false;
            }
        }

        addresses[index] = address;
        records.save(&key, &addresses).await?;
        Ok(())
    }

    /// Delete by id. Deleting the default address leaves the user with
    /// no default; no other address is promoted.
    pub async fn remove(&self, username: &str, address_id: &str) -> ServiceResult<()> {
        let records = self.records()?;
        let key = storage_key(username);
        let mut addresses = records.load(&key).await?;

        let index = addresses
            .iter()
            .position(|a| a.id == address_id)
            .ok_or_else(|| ServiceError::NotFound("address".to_string()))?;

        tracing::debug!(username = %username, address_id = %address_id, "removing address");
        addresses.remove(index);
        records.save(&key, &addresses).await?;
        Ok(())
    }

    /// The single default address, if any.
    pub async fn get_default(&self, username: &str) -> ServiceResult<Option<Address>> {
        let addresses = self.records()?.load(&storage_key(username)).await?;
        Ok(addresses.into_iter().find(|a| a.is_default))
    }

    /// Make `address_id` the single default. Fails with `NotFound`
    /// before any mutation, leaving the stored collection untouched.
    pub async fn set_default(&self, username: &str, address_id: &str) -> ServiceResult<()> {
        let records = self.records()?;
        let key = storage_key(username);
        let mut addresses = records.load(&key).await?;

        if !addresses.iter().any(|a| a.id == address_id) {
            return Err(ServiceError::NotFound("address".to_string()));
        }

        for address in &mut addresses {
            address.is_default = address.id == address_id;
        }

        records.save(&key, &addresses).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimart_store::MemoryStore;

    fn draft(name: &str, is_default: bool) -> AddressDraft {
        AddressDraft {
            recipient_name: name.to_string(),
            phone: "13800138000".to_string(),
            full_address: "42 Example Road, Example City".to_string(),
            is_default,
        }
    }

    fn book_with_memory() -> (AddressBook, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let book = AddressBook::with_store(store.clone());
        (book, store)
    }

    fn default_count(addresses: &[Address]) -> usize {
        addresses.iter().filter(|a| a.is_default).count()
    }

    #[tokio::test]
    async fn add_and_list_preserve_insertion_order() {
        let (book, _) = book_with_memory();
        let first = book.add("alice", draft("Home", false)).await.unwrap();
        let second = book.add("alice", draft("Work", false)).await.unwrap();

        let addresses = book.list("alice").await.unwrap();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0].id, first.id);
        assert_eq!(addresses[1].id, second.id);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn at_most_one_default_after_any_mutation() {
        let (book, _) = book_with_memory();
        book.add("alice", draft("Home", true)).await.unwrap();
        book.add("alice", draft("Work", true)).await.unwrap();

        let addresses = book.list("alice").await.unwrap();
        assert_eq!(default_count(&addresses), 1);
        assert!(addresses[1].is_default, "latest default wins");

        // Updating the first one to default flips it back
        let mut home = addresses[0].clone();
        home.is_default = true;
        book.update("alice", home.clone()).await.unwrap();

        let addresses = book.list("alice").await.unwrap();
        assert_eq!(default_count(&addresses), 1);
        assert_eq!(addresses[0].id, home.id);
        assert!(addresses[0].is_default);
    }

    #[tokio::test]
    async fn set_default_clears_all_others() {
        let (book, _) = book_with_memory();
        book.add("alice", draft("Home", true)).await.unwrap();
        let work = book.add("alice", draft("Work", false)).await.unwrap();

        book.set_default("alice", &work.id).await.unwrap();

        let addresses = book.list("alice").await.unwrap();
        assert_eq!(default_count(&addresses), 1);
        assert!(addresses.iter().find(|a| a.id == work.id).unwrap().is_default);
    }

    #[tokio::test]
    async fn set_default_unknown_id_leaves_blob_untouched() {
        let (book, store) = book_with_memory();
        book.add("alice", draft("Home", true)).await.unwrap();

        let before = store.dump("addresses_alice").unwrap();
        let err = book.set_default("alice", "addr-missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let after = store.dump("addresses_alice").unwrap();
        assert_eq!(before, after, "failed set_default must not rewrite");
    }

    #[tokio::test]
    async fn update_preserves_position() {
        let (book, _) = book_with_memory();
        book.add("alice", draft("Home", false)).await.unwrap();
        let work = book.add("alice", draft("Work", false)).await.unwrap();
        book.add("alice", draft("Gym", false)).await.unwrap();

        let mut updated = work.clone();
        updated.recipient_name = "Workplace".to_string();
        book.update("alice", updated).await.unwrap();

        let addresses = book.list("alice").await.unwrap();
        assert_eq!(addresses[1].id, work.id);
        assert_eq!(addresses[1].recipient_name, "Workplace");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (book, _) = book_with_memory();
        let ghost = draft("Ghost", false).into_address("addr-ghost".to_string(), "alice".to_string());
        let err = book.update("alice", ghost).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_default_does_not_promote() {
        let (book, _) = book_with_memory();
        let home = book.add("alice", draft("Home", true)).await.unwrap();
        book.add("alice", draft("Work", false)).await.unwrap();

        book.remove("alice", &home.id).await.unwrap();

        let addresses = book.list("alice").await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(default_count(&addresses), 0);
        assert!(book.get_default("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_unknown_id_is_not_found() {
        let (book, _) = book_with_memory();
        let err = book.remove("alice", "addr-missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_validates_draft() {
        let (book, _) = book_with_memory();

        let mut bad_phone = draft("Home", false);
        bad_phone.phone = "12345".to_string();
        let err = book.add("alice", bad_phone).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let mut short_address = draft("Home", false);
        short_address.full_address = "xy".to_string();
        let err = book.add("alice", short_address).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        assert!(book.list("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let (book, _) = book_with_memory();
        book.add("alice", draft("Home", true)).await.unwrap();

        assert!(book.list("bob").await.unwrap().is_empty());
        assert!(book.get_default("bob").await.unwrap().is_none());
    }
}

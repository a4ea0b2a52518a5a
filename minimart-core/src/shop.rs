//! Composition root
//!
//! Wires the storage backends, domain services, catalog, session, and
//! checkout together behind one handle. Callers construct a [`Shop`]
//! once and pass it around; every service receives its store through
//! the constructor rather than reaching for process-wide state.

use std::sync::Arc;

use minimart_store::{KvStore, MemoryStore, RedbStore};

use crate::catalog::Catalog;
use crate::checkout::CheckoutOrchestrator;
use crate::config::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::models::Account;
use crate::services::{AccountDirectory, AddressBook, FavoritesIndex, OrderLedger};
use crate::session::SessionContext;

/// Aggregated per-user counts for the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub order_count: usize,
    pub favorite_count: usize,
    pub address_count: usize,
}

/// The assembled application: services, catalog, session, checkout.
pub struct Shop {
    pub accounts: Arc<AccountDirectory>,
    pub addresses: Arc<AddressBook>,
    pub orders: Arc<OrderLedger>,
    pub favorites: Arc<FavoritesIndex>,
    pub catalog: Catalog,
    pub session: Arc<SessionContext>,
    pub checkout: CheckoutOrchestrator,
}

impl Shop {
    /// Open the durable shop under `config.data_dir`, one database file
    /// per domain namespace.
    pub fn open(config: &Config) -> ServiceResult<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(minimart_store::StoreError::from)?;

        let open = |file: &str| -> ServiceResult<Arc<dyn KvStore>> {
            let store = RedbStore::open(config.data_dir.join(file))?;
            Ok(Arc::new(store))
        };

        Ok(Self::assemble(
            open("accounts.redb")?,
            open("addresses.redb")?,
            open("orders.redb")?,
            open("favorites.redb")?,
        ))
    }

    /// Fully in-memory shop, nothing survives the process. Used by
    /// tests and demos.
    pub fn in_memory() -> Self {
        Self::assemble(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        )
    }

    fn assemble(
        accounts_store: Arc<dyn KvStore>,
        addresses_store: Arc<dyn KvStore>,
        orders_store: Arc<dyn KvStore>,
        favorites_store: Arc<dyn KvStore>,
    ) -> Self {
        let accounts = Arc::new(AccountDirectory::with_store(accounts_store));
        let addresses = Arc::new(AddressBook::with_store(addresses_store));
        let orders = Arc::new(OrderLedger::with_store(orders_store));
        let favorites = Arc::new(FavoritesIndex::with_store(favorites_store));
        let session = Arc::new(SessionContext::new());
        let checkout = CheckoutOrchestrator::new(orders.clone(), session.clone());

        Self {
            accounts,
            addresses,
            orders,
            favorites,
            catalog: Catalog::builtin(),
            session,
            checkout,
        }
    }

    /// Verify credentials and bind the session to the user.
    pub async fn sign_in(&self, username: &str, password: &str) -> ServiceResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }
        if !self.accounts.login(username, password).await? {
            return Err(ServiceError::Unauthorized);
        }

        self.session.sign_in(username);
        tracing::debug!(username = %username, "signed in");
        Ok(())
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    /// The signed-in user's account with the password blanked, or
    /// `None` when nobody is signed in.
    pub async fn current_account(&self) -> ServiceResult<Option<Account>> {
        let Some(username) = self.session.current_user() else {
            return Ok(None);
        };
        let account = self.accounts.find_by_username(&username).await?;
        Ok(account.map(|a| a.redacted()))
    }

    /// Counts for the profile screen, recomputed on every call. All
    /// zeros when nobody is signed in.
    pub async fn profile_stats(&self) -> ServiceResult<ProfileStats> {
        let Some(username) = self.session.current_user() else {
            return Ok(ProfileStats::default());
        };

        let orders = self.orders.stats(&username).await?;
        let favorites = self.favorites.list(&username).await?;
        let addresses = self.addresses.list(&username).await?;

        Ok(ProfileStats {
            order_count: orders.total,
            favorite_count: favorites.len(),
            address_count: addresses.len(),
        })
    }
}

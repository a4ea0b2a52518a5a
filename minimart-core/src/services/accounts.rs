//! Account Directory
//!
//! Global registered-user list under the `accounts` namespace, single
//! key `users`. Usernames are unique and immutable; passwords are
//! stored as given, hashing is out of scope here.

use std::sync::Arc;

use minimart_store::{KvStore, RecordStore};
use parking_lot::RwLock;

use super::validate;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Account, AccountUpdate};

const ACCOUNTS_KEY: &str = "users";

/// Manages the global account list.
#[derive(Default)]
pub struct AccountDirectory {
    records: RwLock<Option<RecordStore<Account>>>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        let directory = Self::new();
        directory.init(store);
        directory
    }

    /// Attach the storage handle. Every other operation fails with
    /// `Uninitialized` until this has been called.
    pub fn init(&self, store: Arc<dyn KvStore>) {
        *self.records.write() = Some(RecordStore::new(store));
    }

    fn records(&self) -> ServiceResult<RecordStore<Account>> {
        self.records
            .read()
            .clone()
            .ok_or(ServiceError::Uninitialized)
    }

    /// Register a new account. Fails with `Conflict` when the username
    /// is already taken, `InvalidInput` on short username/password.
    pub async fn register(&self, account: Account) -> ServiceResult<()> {
        validate::check_registration(&account.username, &account.password)?;

        let records = self.records()?;
        let mut accounts = records.load(ACCOUNTS_KEY).await?;

        if accounts.iter().any(|a| a.username == account.username) {
            return Err(ServiceError::Conflict("username".to_string()));
        }

        tracing::debug!(username = %account.username, "registering account");
        accounts.push(account);
        records.save(ACCOUNTS_KEY, &accounts).await?;
        Ok(())
    }

    /// Whether any stored account matches both fields exactly.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<bool> {
        let accounts = self.records()?.load(ACCOUNTS_KEY).await?;
        Ok(accounts
            .iter()
            .any(|a| a.username == username && a.password == password))
    }

    pub async fn exists(&self, username: &str) -> ServiceResult<bool> {
        let accounts = self.records()?.load(ACCOUNTS_KEY).await?;
        Ok(accounts.iter().any(|a| a.username == username))
    }

    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<Account>> {
        let accounts = self.records()?.load(ACCOUNTS_KEY).await?;
        Ok(accounts.into_iter().find(|a| a.username == username))
    }

    /// Merge profile fields. The username itself is never overwritten.
    pub async fn update(&self, username: &str, update: AccountUpdate) -> ServiceResult<()> {
        if let Some(phone) = &update.phone
            && !validate::is_contact_phone(phone)
        {
            return Err(ServiceError::InvalidInput(
                "phone must be 11 digits".to_string(),
            ));
        }
        if let Some(email) = &update.email
            && !validate::is_email(email)
        {
            return Err(ServiceError::InvalidInput(
                "email address is malformed".to_string(),
            ));
        }

        let records = self.records()?;
        let mut accounts = records.load(ACCOUNTS_KEY).await?;
        let account = accounts
            .iter_mut()
            .find(|a| a.username == username)
            .ok_or_else(|| ServiceError::NotFound("account".to_string()))?;

        if let Some(password) = update.password {
            account.password = password;
        }
        if let Some(email) = update.email {
            account.email = Some(email);
        }
        if let Some(phone) = update.phone {
            account.phone = Some(phone);
        }

        tracing::debug!(username = %username, "updating profile");
        records.save(ACCOUNTS_KEY, &accounts).await?;
        Ok(())
    }

    /// Overwrite the password after verifying the old one.
    pub async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        validate::check_password(new_password)?;

        let records = self.records()?;
        let mut accounts = records.load(ACCOUNTS_KEY).await?;
        let account = accounts
            .iter_mut()
            .find(|a| a.username == username)
            .ok_or_else(|| ServiceError::NotFound("account".to_string()))?;

        if account.password != old_password {
            return Err(ServiceError::Unauthorized);
        }

        account.password = new_password.to_string();
        tracing::debug!(username = %username, "changing password");
        records.save(ACCOUNTS_KEY, &accounts).await?;
        Ok(())
    }
}

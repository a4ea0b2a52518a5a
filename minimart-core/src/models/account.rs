//! Account Model

use serde::{Deserialize, Serialize};

/// Registered user account.
///
/// The username is unique and immutable after registration. The
/// password is stored as given; hashing is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Account {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
            phone: None,
        }
    }

    /// Copy with the password blanked, for profile display.
    pub fn redacted(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// Partial profile update. `None` fields are left untouched; the
/// username can never be changed through an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountUpdate {
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

//! Address Model

use serde::{Deserialize, Serialize};

/// Shipping address owned by one user.
///
/// Invariant (enforced by the address book): for a given username, at
/// most one address has `is_default = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Opaque unique id, `addr-<uuid>`
    pub id: String,
    /// Owning username
    pub username: String,
    pub recipient_name: String,
    pub phone: String,
    pub full_address: String,
    pub is_default: bool,
}

/// Create-address payload; id and owner are stamped by the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressDraft {
    pub recipient_name: String,
    pub phone: String,
    pub full_address: String,
    pub is_default: bool,
}

impl AddressDraft {
    pub fn into_address(self, id: String, username: String) -> Address {
        Address {
            id,
            username,
            recipient_name: self.recipient_name,
            phone: self.phone,
            full_address: self.full_address,
            is_default: self.is_default,
        }
    }
}

//! Domain managers
//!
//! One manager per persisted namespace. Every mutating operation loads
//! the entire per-user collection, transforms it in memory, and
//! rewrites it wholesale through a single save. There is no locking:
//! interleaved mutations on the same collection are last-write-wins,
//! accepted for the single-user, single-device usage model.

pub mod accounts;
pub mod addresses;
pub mod favorites;
pub mod orders;

mod validate;

pub use accounts::AccountDirectory;
pub use addresses::AddressBook;
pub use favorites::FavoritesIndex;
pub use orders::OrderLedger;

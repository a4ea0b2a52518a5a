//! Domain layer of the minimart shopping client
//!
//! Per-user record collections (accounts, addresses, orders,
//! favorites) persisted wholesale through `minimart-store`, a
//! session-scoped reactive cart, and the checkout orchestration that
//! ties them together. No server, no sync: one user, one device.

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod shop;
pub mod util;

// Re-exports
pub use catalog::Catalog;
pub use checkout::{CheckoutError, CheckoutOrchestrator, CheckoutReceipt};
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use session::{CartState, SessionContext};
pub use shop::{ProfileStats, Shop};

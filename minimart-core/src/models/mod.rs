//! Domain models
//!
//! Every persisted entity is scoped to exactly one username. Orders
//! store copies of product fields, never references, so catalog
//! changes cannot rewrite history.

mod account;
mod address;
mod cart;
mod order;
mod product;

pub use account::{Account, AccountUpdate};
pub use address::{Address, AddressDraft};
pub use cart::{CartItem, CartTotals};
pub use order::{Order, OrderDraft, OrderItem, OrderStats, OrderStatus, PaymentMethod};
pub use product::Product;

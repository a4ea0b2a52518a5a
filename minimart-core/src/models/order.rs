//! Order Model

use serde::{Deserialize, Serialize};

use super::Address;

/// Order lifecycle status.
///
/// Orders are created `Paid`; the ledger allows any later overwrite,
/// including `Completed` back to `Paid` (intentionally unguarded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Paid,
    Completed,
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Wechat,
    Alipay,
    UnionPay,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Wechat => "WeChat",
            Self::Alipay => "Alipay",
            Self::UnionPay => "UnionPay",
        };
        f.write_str(label)
    }
}

/// Immutable snapshot of one ordered product line.
///
/// Product fields are copied at purchase time so later catalog changes
/// never affect historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: u32,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

/// Persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Opaque unique id, `ORD-<uuid>`
    pub order_id: String,
    /// Owning username
    pub username: String,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
    /// Copied at creation time, not a reference into the address book
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    /// Epoch milliseconds
    pub create_time: i64,
    pub status: OrderStatus,
}

impl Order {
    /// Sum of item quantities.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// One-line title for order lists: the first item's name, with a
    /// remainder count when the order has more lines.
    pub fn summary_title(&self) -> String {
        match self.items.as_slice() {
            [] => "no items".to_string(),
            [only] => only.name.clone(),
            [first, rest @ ..] => format!("{} +{} more", first.name, rest.len()),
        }
    }
}

/// Create-order payload; id and creation time are stamped by the
/// ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    pub username: String,
    pub items: Vec<OrderItem>,
    pub total_price: i64,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
}

/// Per-user order counts, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total: usize,
    pub paid: usize,
    pub completed: usize,
}

//! Cart Model

use serde::{Deserialize, Serialize};

use super::Product;

/// One cart line: a product and its quantity (≥ 1).
///
/// Keyed by product id; the cart never holds two lines for the same
/// product. Session-scoped, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> i64 {
        self.product.price * i64::from(self.quantity)
    }
}

/// Aggregates over the current cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Distinct lines
    pub lines: usize,
    /// Sum of quantities
    pub quantity: u32,
    /// Sum of price × quantity, current snapshot prices
    pub total_price: i64,
}

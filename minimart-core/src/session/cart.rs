//! Cart State
//!
//! Session-scoped (product, quantity) lines keyed by product id, held
//! in a `watch` channel so presentation code observes every change.
//! Mutations never edit the live vector: each one builds a fresh
//! vector and replaces the whole value, so observers relying on
//! snapshot identity always see the update.

use tokio::sync::watch;

use crate::models::{CartItem, CartTotals, Product};

/// Reactive in-memory cart for the active session.
pub struct CartState {
    items: watch::Sender<Vec<CartItem>>,
}

impl Default for CartState {
    fn default() -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self { items }
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current lines.
    pub fn items(&self) -> Vec<CartItem> {
        self.items.borrow().clone()
    }

    /// Watch receiver for observers; yields the full cart on every
    /// replacement.
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }

    /// Add `quantity` of a product. Quantities for an already-present
    /// product id are summed; quantity 0 is a no-op.
    pub fn add_item(&self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let mut next = self.items();
        match next.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.quantity += quantity,
            None => next.push(CartItem { product, quantity }),
        }
        self.items.send_replace(next);
    }

    /// Drop the line for `product_id`, if present.
    pub fn remove_item(&self, product_id: u32) {
        let next: Vec<CartItem> = self
            .items()
            .into_iter()
            .filter(|line| line.product.id != product_id)
            .collect();
        self.items.send_replace(next);
    }

    /// Set a line's quantity. Zero removes the line; an unknown
    /// product id is a no-op.
    pub fn set_quantity(&self, product_id: u32, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        let mut next = self.items();
        if let Some(line) = next.iter_mut().find(|line| line.product.id == product_id) {
            line.quantity = quantity;
            self.items.send_replace(next);
        }
    }

    pub fn increase(&self, product_id: u32) {
        let current = self.quantity_of(product_id);
        self.set_quantity(product_id, current + 1);
    }

    /// Decrease by one; a line at quantity 1 is removed.
    pub fn decrease(&self, product_id: u32) {
        let current = self.quantity_of(product_id);
        if current > 1 {
            self.set_quantity(product_id, current - 1);
        } else {
            self.remove_item(product_id);
        }
    }

    pub fn quantity_of(&self, product_id: u32) -> u32 {
        self.items
            .borrow()
            .iter()
            .find(|line| line.product.id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Aggregates over the current snapshot (current prices, not any
    /// persisted ones).
    pub fn totals(&self) -> CartTotals {
        let items = self.items.borrow();
        CartTotals {
            lines: items.len(),
            quantity: items.iter().map(|line| line.quantity).sum(),
            total_price: items.iter().map(CartItem::line_total).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Replace the cart with the empty sequence.
    pub fn clear(&self) {
        self.items.send_replace(Vec::new());
    }
}

//! Checkout Orchestrator
//!
//! One transaction per call: validate the session cart and chosen
//! address, snapshot the cart into immutable order items, persist the
//! order, and only then clear the cart. A failed persist leaves the
//! cart untouched, so the cart is never cleared without a
//! corresponding stored order. (The reverse does not hold across a
//! process crash between persist and clear; there is no reconciliation
//! on next launch.)

use std::sync::Arc;

use thiserror::Error;

use crate::error::ServiceError;
use crate::models::{Address, OrderDraft, OrderItem, OrderStatus, PaymentMethod};
use crate::services::OrderLedger;
use crate::session::SessionContext;

/// Checkout failures. Every variant leaves cart and ledger unchanged
/// except `Ledger`, which may only occur before the cart is cleared.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("no user is signed in")]
    NotLoggedIn,

    #[error("cart is empty")]
    EmptyCart,

    #[error("no shipping address selected")]
    NoAddress,

    #[error("invalid cart line for product {product_id}")]
    InvalidItem { product_id: u32 },

    #[error(transparent)]
    Ledger(#[from] ServiceError),
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: String,
    pub total_price: i64,
    pub item_count: usize,
}

/// Composes cart state, a chosen address, and the order ledger into a
/// single all-or-nothing-visible checkout operation.
pub struct CheckoutOrchestrator {
    orders: Arc<OrderLedger>,
    session: Arc<SessionContext>,
}

impl CheckoutOrchestrator {
    pub fn new(orders: Arc<OrderLedger>, session: Arc<SessionContext>) -> Self {
        Self { orders, session }
    }

    /// Convert the session cart plus `address` and `payment_method`
    /// into a persisted `Paid` order, clearing the cart on success
    /// only.
    pub async fn checkout(
        &self,
        address: Option<Address>,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let username = self.session.current_user().ok_or(CheckoutError::NotLoggedIn)?;

        let lines = self.session.cart().items();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let address = address.ok_or(CheckoutError::NoAddress)?;

        for line in &lines {
            if line.product.price <= 0 || line.quantity == 0 {
                return Err(CheckoutError::InvalidItem {
                    product_id: line.product.id,
                });
            }
        }

        // Immutable snapshot, decoupled from live catalog and cart
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id,
                name: line.product.name.clone(),
                price: line.product.price,
                quantity: line.quantity,
            })
            .collect();
        let total_price: i64 = lines.iter().map(|line| line.line_total()).sum();
        let item_count = items.len();

        let order_id = self
            .orders
            .create(OrderDraft {
                username: username.clone(),
                items,
                total_price,
                shipping_address: address,
                payment_method,
                status: OrderStatus::Paid,
            })
            .await?;

        // Clear only after the order is durably written
        self.session.cart().clear();
        tracing::debug!(username = %username, order_id = %order_id, "checkout complete");

        Ok(CheckoutReceipt {
            order_id,
            total_price,
            item_count,
        })
    }
}

//! Order Ledger
//!
//! Per-user orders under the `orders` namespace, one key per username.
//! Orders are immutable snapshots except for the status field.

use std::sync::Arc;

use minimart_store::{KvStore, RecordStore};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Order, OrderDraft, OrderStats, OrderStatus};
use crate::util;

/// Manages one user's order history.
#[derive(Default)]
pub struct OrderLedger {
    records: RwLock<Option<RecordStore<Order>>>,
}

fn storage_key(username: &str) -> String {
    format!("orders_{username}")
}

/// UUID-backed order id: unique by construction, unlike the
/// timestamp+random scheme it replaces.
fn generate_order_id() -> String {
    format!("ORD-{}", Uuid::new_v4())
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        let ledger = Self::new();
        ledger.init(store);
        ledger
    }

    pub fn init(&self, store: Arc<dyn KvStore>) {
        *self.records.write() = Some(RecordStore::new(store));
    }

    fn records(&self) -> ServiceResult<RecordStore<Order>> {
        self.records
            .read()
            .clone()
            .ok_or(ServiceError::Uninitialized)
    }

    /// Stamp id and creation time, append, persist. Returns the new
    /// order id.
    pub async fn create(&self, draft: OrderDraft) -> ServiceResult<String> {
        let records = self.records()?;
        let key = storage_key(&draft.username);

        let order = Order {
            order_id: generate_order_id(),
            username: draft.username,
            items: draft.items,
            total_price: draft.total_price,
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            create_time: util::now_millis(),
            status: draft.status,
        };

        let mut orders = records.load(&key).await?;
        tracing::debug!(
            username = %order.username,
            order_id = %order.order_id,
            total_price = order.total_price,
            "creating order"
        );
        let order_id = order.order_id.clone();
        orders.push(order);
        records.save(&key, &orders).await?;
        Ok(order_id)
    }

    /// All orders for the user, creation order.
    pub async fn list(&self, username: &str) -> ServiceResult<Vec<Order>> {
        let orders = self.records()?.load(&storage_key(username)).await?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, username: &str, order_id: &str) -> ServiceResult<Option<Order>> {
        let orders = self.records()?.load(&storage_key(username)).await?;
        Ok(orders.into_iter().find(|o| o.order_id == order_id))
    }

    /// Overwrite the status field and persist.
    ///
    /// Deliberately permissive: no forward-only guard, so a
    /// `Completed` order can be set back to `Paid`.
    pub async fn update_status(
        &self,
        username: &str,
        order_id: &str,
        status: OrderStatus,
    ) -> ServiceResult<()> {
        let records = self.records()?;
        let key = storage_key(username);
        let mut orders = records.load(&key).await?;

        let order = orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| ServiceError::NotFound("order".to_string()))?;

        order.status = status;
        tracing::debug!(username = %username, order_id = %order_id, ?status, "updating order status");
        records.save(&key, &orders).await?;
        Ok(())
    }

    /// Counts recomputed by scanning the collection; never cached.
    pub async fn stats(&self, username: &str) -> ServiceResult<OrderStats> {
        let orders = self.records()?.load(&storage_key(username)).await?;
        Ok(OrderStats {
            total: orders.len(),
            paid: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Paid)
                .count(),
            completed: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .count(),
        })
    }
}

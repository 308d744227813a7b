//! In-memory order repository.
//!
//! Keeps orders in a map keyed by business id. Used by tests and by local
//! runs without a database; nothing survives a restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, OrderId};
use crate::domain::order::Order;
use crate::ports::OrderRepository;

/// In-memory [`OrderRepository`] with the same version semantics as the
/// PostgreSQL adapter.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All orders currently held for one customer.
    pub async fn orders_for_customer(&self, customer_id: &CustomerId) -> Vec<Order> {
        self.orders
            .read()
            .await
            .values()
            .filter(|o| o.customer_id() == customer_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

fn not_found(order_id: &OrderId) -> DomainError {
    DomainError::new(
        ErrorCode::OrderNotFound,
        format!("Order not found: {}", order_id),
    )
    .with_detail("order_id", order_id.as_str())
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        let key = order.order_id().as_str().to_string();
        if orders.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Order id already taken: {}", key),
            )
            .with_detail("field", "order_id"));
        }
        orders.insert(key, order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;
        let stored = orders
            .get_mut(order.order_id().as_str())
            .ok_or_else(|| not_found(order.order_id()))?;

        if stored.version() != order.version() {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "expected version {} of {}, found {}",
                    order.version(),
                    order.order_id(),
                    stored.version()
                ),
            ));
        }

        let mut next = order.clone();
        next.take_events();
        next.bump_version();
        *stored = next;
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().await.get(order_id.as_str()).cloned())
    }

    async fn exists(&self, order_id: &OrderId) -> Result<bool, DomainError> {
        Ok(self.orders.read().await.contains_key(order_id.as_str()))
    }

    async fn count_for_year(&self, year: i32) -> Result<u32, DomainError> {
        let count = self
            .orders
            .read()
            .await
            .values()
            .filter(|o| o.created_at().year() == year)
            .count();
        Ok(count as u32)
    }

    async fn delete(&self, order_id: &OrderId) -> Result<(), DomainError> {
        self.orders
            .write()
            .await
            .remove(order_id.as_str())
            .map(|_| ())
            .ok_or_else(|| not_found(order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AdminId, Timestamp};
    use crate::domain::order::{OrderDetails, OrderDraft};

    fn order(seq: u32) -> Order {
        let draft = OrderDraft::new(
            CustomerId::new("cust-1").unwrap(),
            OrderDetails {
                product_name: "Tote bags".to_string(),
                quantity: 300,
                total_amount: 900.0,
                shipping_origin: None,
                shipping_destination: None,
                notes: None,
            },
        );
        Order::create(
            OrderId::from_parts(Timestamp::now().year(), seq),
            draft,
            AdminId::new("admin-1").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_and_find() {
        let repo = InMemoryOrderRepository::new();
        let order = order(1);
        repo.save(&order).await.unwrap();

        let found = repo.find_by_order_id(order.order_id()).await.unwrap();
        assert_eq!(found.unwrap().order_id(), order.order_id());
        assert!(repo.exists(order.order_id()).await.unwrap());
    }

    #[tokio::test]
    async fn save_rejects_duplicate_order_id() {
        let repo = InMemoryOrderRepository::new();
        repo.save(&order(1)).await.unwrap();
        let err = repo.save(&order(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = InMemoryOrderRepository::new();
        let mut order = order(1);
        repo.save(&order).await.unwrap();

        order.advance_phase().unwrap();
        repo.update(&order).await.unwrap();

        let stored = repo.find_by_order_id(order.order_id()).await.unwrap().unwrap();
        assert_eq!(stored.version(), 1);
        assert_eq!(stored.progress().current(), 2);
    }

    #[tokio::test]
    async fn update_with_stale_version_conflicts() {
        let repo = InMemoryOrderRepository::new();
        let order = order(1);
        repo.save(&order).await.unwrap();

        let mut first = order.clone();
        let mut second = order.clone();
        first.advance_phase().unwrap();
        second.advance_phase().unwrap();

        repo.update(&first).await.unwrap();
        let err = repo.update(&second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);
    }

    #[tokio::test]
    async fn update_missing_order_is_not_found() {
        let repo = InMemoryOrderRepository::new();
        let err = repo.update(&order(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn count_for_year_counts_only_that_year() {
        let repo = InMemoryOrderRepository::new();
        repo.save(&order(1)).await.unwrap();
        repo.save(&order(2)).await.unwrap();

        let year = Timestamp::now().year();
        assert_eq!(repo.count_for_year(year).await.unwrap(), 2);
        assert_eq!(repo.count_for_year(year - 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_removes_order() {
        let repo = InMemoryOrderRepository::new();
        let order = order(1);
        repo.save(&order).await.unwrap();

        repo.delete(order.order_id()).await.unwrap();

        assert!(repo.is_empty().await);
        assert!(repo.delete(order.order_id()).await.is_err());
    }
}

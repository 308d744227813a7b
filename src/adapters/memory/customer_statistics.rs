//! In-memory customer statistics, computed from an in-memory order store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{CustomerId, DomainError};
use crate::ports::CustomerStatistics;

use super::InMemoryOrderRepository;

/// Figures derived from a customer's orders.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomerTotals {
    pub order_count: u32,
    pub total_spent: f64,
}

/// [`CustomerStatistics`] over an [`InMemoryOrderRepository`].
#[derive(Clone)]
pub struct InMemoryCustomerStatistics {
    orders: InMemoryOrderRepository,
    totals: Arc<RwLock<HashMap<String, CustomerTotals>>>,
}

impl InMemoryCustomerStatistics {
    pub fn new(orders: InMemoryOrderRepository) -> Self {
        Self {
            orders,
            totals: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Last recomputed figures for a customer, if any.
    pub async fn totals_for(&self, customer_id: &CustomerId) -> Option<CustomerTotals> {
        self.totals.read().await.get(customer_id.as_str()).copied()
    }
}

#[async_trait]
impl CustomerStatistics for InMemoryCustomerStatistics {
    async fn recompute(&self, customer_id: &CustomerId) -> Result<(), DomainError> {
        let orders = self.orders.orders_for_customer(customer_id).await;
        let totals = CustomerTotals {
            order_count: orders.len() as u32,
            total_spent: orders.iter().map(|o| o.details().total_amount).sum(),
        };
        self.totals
            .write()
            .await
            .insert(customer_id.as_str().to_string(), totals);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AdminId, OrderId};
    use crate::domain::order::{Order, OrderDetails, OrderDraft};
    use crate::ports::OrderRepository;

    fn order(seq: u32, customer: &str, amount: f64) -> Order {
        let draft = OrderDraft::new(
            CustomerId::new(customer).unwrap(),
            OrderDetails {
                product_name: "Notebooks".to_string(),
                quantity: 10,
                total_amount: amount,
                shipping_origin: None,
                shipping_destination: None,
                notes: None,
            },
        );
        Order::create(OrderId::from_parts(2025, seq), draft, AdminId::new("a").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn recompute_sums_customer_orders() {
        let repo = InMemoryOrderRepository::new();
        repo.save(&order(1, "c-1", 100.0)).await.unwrap();
        repo.save(&order(2, "c-1", 250.5)).await.unwrap();
        repo.save(&order(3, "c-2", 999.0)).await.unwrap();
        let stats = InMemoryCustomerStatistics::new(repo);

        let customer = CustomerId::new("c-1").unwrap();
        stats.recompute(&customer).await.unwrap();

        let totals = stats.totals_for(&customer).await.unwrap();
        assert_eq!(totals.order_count, 2);
        assert!((totals.total_spent - 350.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn recompute_for_customer_without_orders_is_zero() {
        let stats = InMemoryCustomerStatistics::new(InMemoryOrderRepository::new());
        let customer = CustomerId::new("nobody").unwrap();
        stats.recompute(&customer).await.unwrap();
        assert_eq!(stats.totals_for(&customer).await, Some(CustomerTotals::default()));
    }
}

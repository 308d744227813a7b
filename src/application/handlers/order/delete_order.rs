//! DeleteOrderHandler - Command handler for removing orders.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, OrderId};
use crate::domain::order::OrderError;
use crate::ports::{CustomerStatistics, OrderRepository};

use super::side_effects::recompute_customers;
use super::OrderLocks;

/// Command to delete an order.
#[derive(Debug, Clone)]
pub struct DeleteOrderCommand {
    pub order_id: OrderId,
}

/// Handler for deleting orders.
pub struct DeleteOrderHandler {
    repository: Arc<dyn OrderRepository>,
    statistics: Arc<dyn CustomerStatistics>,
    locks: OrderLocks,
}

impl DeleteOrderHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        statistics: Arc<dyn CustomerStatistics>,
        locks: OrderLocks,
    ) -> Self {
        Self {
            repository,
            statistics,
            locks,
        }
    }

    /// Deletes the order and returns its id.
    pub async fn handle(
        &self,
        cmd: DeleteOrderCommand,
        metadata: CommandMetadata,
    ) -> Result<OrderId, OrderError> {
        let _guard = self.locks.acquire(&cmd.order_id).await;

        let order = self
            .repository
            .find_by_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(cmd.order_id.clone()))?;

        self.repository.delete(order.order_id()).await?;

        tracing::info!(
            order_id = %order.order_id(),
            admin_id = %metadata.admin_id,
            correlation_id = metadata.correlation_id_opt().unwrap_or("-"),
            "Order deleted"
        );

        recompute_customers(&self.statistics, &[order.customer_id()]).await;

        Ok(cmd.order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryCustomerStatistics, InMemoryOrderRepository};
    use crate::domain::foundation::{AdminId, CustomerId};
    use crate::domain::order::{Order, OrderDetails, OrderDraft};

    async fn seed(repo: &InMemoryOrderRepository, seq: u32) -> OrderId {
        let draft = OrderDraft::new(
            CustomerId::new("cust-1").unwrap(),
            OrderDetails {
                product_name: "Cotton tees".to_string(),
                quantity: 800,
                total_amount: 3200.0,
                shipping_origin: None,
                shipping_destination: None,
                notes: None,
            },
        );
        let order = Order::create(
            OrderId::from_parts(2025, seq),
            draft,
            AdminId::new("admin-0").unwrap(),
        )
        .unwrap();
        repo.save(&order).await.unwrap();
        order.order_id().clone()
    }

    #[tokio::test]
    async fn deletes_and_recomputes_customer() {
        let repo = InMemoryOrderRepository::new();
        let stats = InMemoryCustomerStatistics::new(repo.clone());
        let first = seed(&repo, 1).await;
        seed(&repo, 2).await;
        let handler =
            DeleteOrderHandler::new(Arc::new(repo.clone()), Arc::new(stats.clone()), OrderLocks::new());

        let deleted = handler
            .handle(
                DeleteOrderCommand {
                    order_id: first.clone(),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap();

        assert_eq!(deleted, first);
        assert!(!repo.exists(&first).await.unwrap());
        let totals = stats
            .totals_for(&CustomerId::new("cust-1").unwrap())
            .await
            .unwrap();
        assert_eq!(totals.order_count, 1);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let repo = InMemoryOrderRepository::new();
        let handler = DeleteOrderHandler::new(
            Arc::new(repo.clone()),
            Arc::new(InMemoryCustomerStatistics::new(repo)),
            OrderLocks::new(),
        );

        let err = handler
            .handle(
                DeleteOrderCommand {
                    order_id: OrderId::from_parts(2025, 77),
                },
                CommandMetadata::test_fixture(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::NotFound(_)));
    }
}

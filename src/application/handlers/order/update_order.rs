//! UpdateOrderHandler - Command handler for bulk order updates.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, OrderId};
use crate::domain::order::{OrderError, OrderPatch};
use crate::ports::{AdminActivity, AdminActivityTracker, CustomerStatistics, OrderRepository};

use super::side_effects::{record_activity, recompute_customers, OrderCommandResult};
use super::OrderLocks;

/// Command to apply a bulk update to an order.
#[derive(Debug, Clone)]
pub struct UpdateOrderCommand {
    pub order_id: OrderId,
    pub patch: OrderPatch,
}

/// Handler for bulk order updates.
pub struct UpdateOrderHandler {
    repository: Arc<dyn OrderRepository>,
    statistics: Arc<dyn CustomerStatistics>,
    activity: Arc<dyn AdminActivityTracker>,
    locks: OrderLocks,
}

impl UpdateOrderHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        statistics: Arc<dyn CustomerStatistics>,
        activity: Arc<dyn AdminActivityTracker>,
        locks: OrderLocks,
    ) -> Self {
        Self {
            repository,
            statistics,
            activity,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateOrderCommand,
        metadata: CommandMetadata,
    ) -> Result<OrderCommandResult, OrderError> {
        let _guard = self.locks.acquire(&cmd.order_id).await;

        // 1. Load
        let mut order = self
            .repository
            .find_by_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(cmd.order_id.clone()))?;
        let previous_customer = order.customer_id().clone();

        // 2. Apply
        order.apply_update(&cmd.patch)?;

        // 3. Persist (version-checked)
        self.repository.update(&order).await?;

        tracing::info!(
            order_id = %order.order_id(),
            status = %order.status(),
            current = order.progress().current(),
            total = order.progress().total(),
            "Order updated"
        );

        // 4. Follow-up updates, old and new customer alike
        recompute_customers(&self.statistics, &[&previous_customer, order.customer_id()]).await;
        record_activity(&self.activity, &metadata.admin_id, AdminActivity::order_modified()).await;

        Ok(OrderCommandResult::finish(order, &metadata))
    }
}

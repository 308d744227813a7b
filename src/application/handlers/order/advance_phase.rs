//! AdvancePhaseHandler - Moves an order to its next phase.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, OrderId};
use crate::domain::order::OrderError;
use crate::ports::{AdminActivity, AdminActivityTracker, OrderRepository};

use super::side_effects::{record_activity, OrderCommandResult};
use super::OrderLocks;

/// Command to advance an order by one phase.
#[derive(Debug, Clone)]
pub struct AdvancePhaseCommand {
    pub order_id: OrderId,
}

/// Handler for advancing orders.
pub struct AdvancePhaseHandler {
    repository: Arc<dyn OrderRepository>,
    activity: Arc<dyn AdminActivityTracker>,
    locks: OrderLocks,
}

impl AdvancePhaseHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        activity: Arc<dyn AdminActivityTracker>,
        locks: OrderLocks,
    ) -> Self {
        Self {
            repository,
            activity,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: AdvancePhaseCommand,
        metadata: CommandMetadata,
    ) -> Result<OrderCommandResult, OrderError> {
        let _guard = self.locks.acquire(&cmd.order_id).await;

        let mut order = self
            .repository
            .find_by_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(cmd.order_id.clone()))?;

        order.advance_phase()?;
        self.repository.update(&order).await?;

        tracing::info!(
            order_id = %order.order_id(),
            phase = order.current_phase(),
            current = order.progress().current(),
            status = %order.status(),
            "Order advanced"
        );

        record_activity(&self.activity, &metadata.admin_id, AdminActivity::order_modified()).await;

        Ok(OrderCommandResult::finish(order, &metadata))
    }
}

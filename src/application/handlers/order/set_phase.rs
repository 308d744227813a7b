//! SetPhaseHandler - Jumps an order to a named phase.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, OrderId};
use crate::domain::order::OrderError;
use crate::ports::{AdminActivity, AdminActivityTracker, OrderRepository};

use super::side_effects::{record_activity, OrderCommandResult};
use super::OrderLocks;

/// Command to set an order's phase by title.
#[derive(Debug, Clone)]
pub struct SetPhaseCommand {
    pub order_id: OrderId,
    pub phase: String,
    /// Overrides the cursor implied by the phase title.
    pub progress: Option<i64>,
}

/// Handler for manual phase changes.
pub struct SetPhaseHandler {
    repository: Arc<dyn OrderRepository>,
    activity: Arc<dyn AdminActivityTracker>,
    locks: OrderLocks,
}

impl SetPhaseHandler {
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
        cmd: SetPhaseCommand,
        metadata: CommandMetadata,
    ) -> Result<OrderCommandResult, OrderError> {
        let _guard = self.locks.acquire(&cmd.order_id).await;

        let mut order = self
            .repository
            .find_by_order_id(&cmd.order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(cmd.order_id.clone()))?;

        order.set_phase(&cmd.phase, cmd.progress)?;
        self.repository.update(&order).await?;

        tracing::info!(
            order_id = %order.order_id(),
            phase = order.current_phase(),
            current = order.progress().current(),
            status = %order.status(),
            "Order phase set"
        );

        record_activity(&self.activity, &metadata.admin_id, AdminActivity::order_modified()).await;

        Ok(OrderCommandResult::finish(order, &metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAdminActivity, InMemoryOrderRepository};
    use crate::domain::foundation::{AdminId, CustomerId};
    use crate::domain::order::{Order, OrderDetails, OrderDraft, OrderStatus};

    async fn seed(repo: &InMemoryOrderRepository, status: Option<OrderStatus>) -> OrderId {
        let mut draft = OrderDraft::new(
            CustomerId::new("cust-1").unwrap(),
            OrderDetails {
                product_name: "Glass jars".to_string(),
                quantity: 5000,
                total_amount: 4000.0,
                shipping_origin: None,
                shipping_destination: None,
                notes: None,
            },
        );
        draft.status = status;
        let order = Order::create(
            OrderId::from_parts(2025, 8),
            draft,
            AdminId::new("admin-0").unwrap(),
        )
        .unwrap();
        repo.save(&order).await.unwrap();
        order.order_id().clone()
    }

    fn handler(repo: &InMemoryOrderRepository) -> SetPhaseHandler {
        SetPhaseHandler::new(
            Arc::new(repo.clone()),
            Arc::new(InMemoryAdminActivity::new()),
            OrderLocks::new(),
        )
    }

    fn command(order_id: &OrderId, phase: &str) -> SetPhaseCommand {
        SetPhaseCommand {
            order_id: order_id.clone(),
            phase: phase.to_string(),
            progress: None,
        }
    }

    #[tokio::test]
    async fn sets_production_phase() {
        let repo = InMemoryOrderRepository::new();
        let order_id = seed(&repo, None).await;

        let result = handler(&repo)
            .handle(command(&order_id, "Production Phase"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.order.progress().current(), 5);
        assert_eq!(result.order.status(), OrderStatus::Production);
        let stored = repo.find_by_order_id(&order_id).await.unwrap().unwrap();
        assert_eq!(stored.current_phase(), "Production Phase");
        assert_eq!(stored.version(), 1);
    }

    #[tokio::test]
    async fn unknown_phase_is_rejected() {
        let repo = InMemoryOrderRepository::new();
        let order_id = seed(&repo, None).await;

        let err = handler(&repo)
            .handle(command(&order_id, "Warehousing"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, OrderError::InvalidPhase("Warehousing".to_string()));
    }

    #[tokio::test]
    async fn cancelled_order_is_terminal() {
        let repo = InMemoryOrderRepository::new();
        let order_id = seed(&repo, Some(OrderStatus::Cancelled)).await;

        let err = handler(&repo)
            .handle(command(&order_id, "Sampling"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::TerminalState(_)));
    }

    #[tokio::test]
    async fn explicit_progress_overrides_title_index() {
        let repo = InMemoryOrderRepository::new();
        let order_id = seed(&repo, None).await;
        let mut cmd = command(&order_id, "Sampling");
        cmd.progress = Some(6);

        let result = handler(&repo)
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(result.order.progress().current(), 6);
        assert_eq!(result.order.current_phase(), "Sampling");
        assert_eq!(result.order.status(), OrderStatus::Shipped);
    }
}

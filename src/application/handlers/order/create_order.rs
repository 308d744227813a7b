//! CreateOrderHandler - Command handler for creating orders.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::foundation::{CommandMetadata, Timestamp};
use crate::domain::order::{Order, OrderDraft, OrderError};
use crate::ports::{AdminActivity, AdminActivityTracker, CustomerStatistics, OrderRepository};

use super::side_effects::{record_activity, recompute_customers, OrderCommandResult};
use super::OrderIdGenerator;

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub draft: OrderDraft,
}

/// Handler for creating orders.
pub struct CreateOrderHandler {
    repository: Arc<dyn OrderRepository>,
    statistics: Arc<dyn CustomerStatistics>,
    activity: Arc<dyn AdminActivityTracker>,
    ids: OrderIdGenerator,
    // Id allocation and insert run as one step per process.
    allocation: Mutex<()>,
}

impl CreateOrderHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        statistics: Arc<dyn CustomerStatistics>,
        activity: Arc<dyn AdminActivityTracker>,
        max_order_id_attempts: u32,
    ) -> Self {
        Self {
            ids: OrderIdGenerator::new(repository.clone(), max_order_id_attempts),
            repository,
            statistics,
            activity,
            allocation: Mutex::new(()),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateOrderCommand,
        metadata: CommandMetadata,
    ) -> Result<OrderCommandResult, OrderError> {
        // 1. Validate before allocating anything
        cmd.draft.details.validate()?;

        // 2. Allocate id, build aggregate, persist
        let order = {
            let _allocation = self.allocation.lock().await;
            let order_id = self.ids.next_id(Timestamp::now()).await?;
            let order = Order::create(order_id, cmd.draft, metadata.admin_id.clone())?;
            self.repository.save(&order).await?;
            order
        };

        tracing::info!(
            order_id = %order.order_id(),
            customer_id = %order.customer_id(),
            status = %order.status(),
            current = order.progress().current(),
            "Order created"
        );

        // 3. Follow-up updates
        recompute_customers(&self.statistics, &[order.customer_id()]).await;
        record_activity(&self.activity, &metadata.admin_id, AdminActivity::order_created()).await;

        Ok(OrderCommandResult::finish(order, &metadata))
    }
}

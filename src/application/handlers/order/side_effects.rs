//! Follow-up work shared by the mutating order handlers.
//!
//! Statistics and activity updates run after the order is persisted. They
//! are not atomic with the write; a failure is logged and the command still
//! succeeds.

use std::sync::Arc;

use crate::domain::foundation::{AdminId, CommandMetadata, CustomerId};
use crate::domain::order::{Order, OrderEvent};
use crate::ports::{AdminActivity, AdminActivityTracker, CustomerStatistics};

/// Result of a successful order command.
#[derive(Debug, Clone)]
pub struct OrderCommandResult {
    pub order: Order,
    pub events: Vec<OrderEvent>,
}

impl OrderCommandResult {
    /// Drains the order's events and logs them under the command's metadata.
    pub(crate) fn finish(mut order: Order, metadata: &CommandMetadata) -> Self {
        let events = order.take_events();
        for event in &events {
            tracing::info!(
                event_type = event.event_type(),
                order_id = %event.order_id(),
                admin_id = %metadata.admin_id,
                correlation_id = metadata.correlation_id_opt().unwrap_or("-"),
                "Order event recorded"
            );
        }
        Self { order, events }
    }
}

/// Recomputes statistics for every distinct customer given.
pub(crate) async fn recompute_customers(
    statistics: &Arc<dyn CustomerStatistics>,
    customers: &[&CustomerId],
) {
    let mut seen: Vec<&CustomerId> = Vec::with_capacity(customers.len());
    for &customer_id in customers {
        if seen.contains(&customer_id) {
            continue;
        }
        seen.push(customer_id);
        if let Err(e) = statistics.recompute(customer_id).await {
            tracing::warn!(customer_id = %customer_id, error = %e, "Customer statistics recompute failed");
        }
    }
}

/// Records an admin activity, logging instead of failing.
pub(crate) async fn record_activity(
    tracker: &Arc<dyn AdminActivityTracker>,
    admin_id: &AdminId,
    activity: AdminActivity,
) {
    if let Err(e) = tracker.record_activity(admin_id, activity).await {
        tracing::warn!(admin_id = %admin_id, error = %e, "Admin activity update failed");
    }
}

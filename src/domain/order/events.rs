//! Order domain events.
//!
//! Recorded by the aggregate on every successful mutation and drained by
//! the application handlers with [`Order::take_events`](super::Order::take_events).

use serde::Serialize;

use crate::domain::foundation::{AdminId, CustomerId, OrderId, Timestamp};

use super::OrderStatus;

/// Something that happened to an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderEvent {
    Created {
        order_id: OrderId,
        customer_id: CustomerId,
        created_by: AdminId,
        status: OrderStatus,
        current: u8,
        occurred_at: Timestamp,
    },
    Updated {
        order_id: OrderId,
        progress_changed: bool,
        status: OrderStatus,
        current: u8,
        occurred_at: Timestamp,
    },
    PhaseAdvanced {
        order_id: OrderId,
        from: u8,
        to: u8,
        phase: String,
        status: OrderStatus,
        occurred_at: Timestamp,
    },
    PhaseSet {
        order_id: OrderId,
        phase: String,
        current: u8,
        status: OrderStatus,
        occurred_at: Timestamp,
    },
}

impl OrderEvent {
    /// Dotted event name used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Created { .. } => "order.created",
            OrderEvent::Updated { .. } => "order.updated",
            OrderEvent::PhaseAdvanced { .. } => "order.phase_advanced",
            OrderEvent::PhaseSet { .. } => "order.phase_set",
        }
    }

    pub fn order_id(&self) -> &OrderId {
        match self {
            OrderEvent::Created { order_id, .. }
            | OrderEvent::Updated { order_id, .. }
            | OrderEvent::PhaseAdvanced { order_id, .. }
            | OrderEvent::PhaseSet { order_id, .. } => order_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = OrderEvent::PhaseSet {
            order_id: OrderId::from_parts(2025, 12),
            phase: "Sampling".to_string(),
            current: 3,
            status: OrderStatus::InProgress,
            occurred_at: Timestamp::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_set");
        assert_eq!(json["order_id"], "ORD-2025-012");
        assert_eq!(event.event_type(), "order.phase_set");
    }
}

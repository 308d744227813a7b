//! HTTP DTOs for order endpoints.
//!
//! Requests are parsed into the typed drafts and patches of the order
//! module; responses flatten the aggregate and add the per-step boolean
//! flags that API clients read.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, ErrorCode, Timestamp, ValidationError};
use crate::domain::order::{
    DetailsPatch, Order, OrderDetails, OrderDraft, OrderPatch, OrderStatus, ProgressPatch,
    StepPatch, StepStatus, TimelineStep,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Product and shipping details on create.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetailsRequest {
    pub product_name: String,
    pub quantity: u32,
    pub total_amount: f64,
    #[serde(default)]
    pub shipping_origin: Option<String>,
    #[serde(default)]
    pub shipping_destination: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<OrderDetailsRequest> for OrderDetails {
    fn from(req: OrderDetailsRequest) -> Self {
        Self {
            product_name: req.product_name.trim().to_string(),
            quantity: req.quantity,
            total_amount: req.total_amount,
            shipping_origin: req.shipping_origin,
            shipping_destination: req.shipping_destination,
            notes: req.notes,
        }
    }
}

/// Partial details on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsPatchRequest {
    pub product_name: Option<String>,
    pub quantity: Option<u32>,
    pub total_amount: Option<f64>,
    pub shipping_origin: Option<String>,
    pub shipping_destination: Option<String>,
    pub notes: Option<String>,
}

impl From<DetailsPatchRequest> for DetailsPatch {
    fn from(req: DetailsPatchRequest) -> Self {
        Self {
            product_name: req.product_name.map(|p| p.trim().to_string()),
            quantity: req.quantity,
            total_amount: req.total_amount,
            shipping_origin: req.shipping_origin,
            shipping_destination: req.shipping_destination,
            notes: req.notes,
        }
    }
}

/// Caller-declared progress.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProgressRequest {
    pub current: Option<i64>,
    pub total: Option<i64>,
}

impl From<ProgressRequest> for ProgressPatch {
    fn from(req: ProgressRequest) -> Self {
        Self {
            current: req.current,
            total: req.total,
        }
    }
}

/// One caller-supplied timeline step. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_duration: Option<String>,
    pub start_date: Option<Timestamp>,
    pub finish_date: Option<Timestamp>,
    pub status: Option<StepStatus>,
    pub is_completed: Option<bool>,
    pub is_in_progress: Option<bool>,
}

impl From<StepRequest> for StepPatch {
    fn from(req: StepRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            estimated_duration: req.estimated_duration,
            start_date: req.start_date,
            finish_date: req.finish_date,
            status: req.status,
            is_completed: req.is_completed,
            is_in_progress: req.is_in_progress,
        }
    }
}

/// Request to create an order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub details: OrderDetailsRequest,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_phase: Option<String>,
    #[serde(default)]
    pub progress: Option<ProgressRequest>,
    #[serde(default)]
    pub timeline: Option<Vec<StepRequest>>,
}

impl CreateOrderRequest {
    /// Validates identifiers and labels and builds the draft.
    pub fn into_draft(self) -> Result<OrderDraft, ValidationError> {
        Ok(OrderDraft {
            customer_id: CustomerId::new(self.customer_id)?,
            details: self.details.into(),
            status: parse_status(self.status.as_deref())?,
            current_phase: self.current_phase,
            progress: self.progress.map(Into::into),
            timeline: self
                .timeline
                .map(|steps| steps.into_iter().map(Into::into).collect()),
        })
    }
}

/// Request to bulk-update an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub customer_id: Option<String>,
    pub details: Option<DetailsPatchRequest>,
    pub status: Option<String>,
    pub current_phase: Option<String>,
    pub progress: Option<ProgressRequest>,
    pub timeline: Option<Vec<StepRequest>>,
}

impl UpdateOrderRequest {
    /// Validates identifiers and labels and builds the patch.
    pub fn into_patch(self) -> Result<OrderPatch, ValidationError> {
        Ok(OrderPatch {
            customer_id: self.customer_id.map(CustomerId::new).transpose()?,
            details: self.details.map(Into::into).unwrap_or_default(),
            status: parse_status(self.status.as_deref())?,
            current_phase: self.current_phase,
            progress: self.progress.map(Into::into),
            timeline: self
                .timeline
                .map(|steps| steps.into_iter().map(Into::into).collect()),
        })
    }
}

/// Request to set an order's phase.
#[derive(Debug, Clone, Deserialize)]
pub struct SetPhaseRequest {
    pub phase: String,
    #[serde(default)]
    pub progress: Option<i64>,
}

/// Blank labels count as absent; anything else must be a known status.
fn parse_status(raw: Option<&str>) -> Result<Option<OrderStatus>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse::<OrderStatus>().map(Some),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Product and shipping details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailsResponse {
    pub product_name: String,
    pub quantity: u32,
    pub total_amount: f64,
    pub shipping_origin: Option<String>,
    pub shipping_destination: Option<String>,
    pub notes: Option<String>,
}

impl From<&OrderDetails> for OrderDetailsResponse {
    fn from(details: &OrderDetails) -> Self {
        Self {
            product_name: details.product_name.clone(),
            quantity: details.quantity,
            total_amount: details.total_amount,
            shipping_origin: details.shipping_origin.clone(),
            shipping_destination: details.shipping_destination.clone(),
            notes: details.notes.clone(),
        }
    }
}

/// Progress cursor with its completion percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub current: u8,
    pub total: u8,
    pub percentage: u8,
}

/// One timeline step, with the status also spelled out as flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineStepResponse {
    pub id: u8,
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub status: StepStatus,
    pub is_completed: bool,
    pub is_in_progress: bool,
    pub is_locked: bool,
}

impl From<&TimelineStep> for TimelineStepResponse {
    fn from(step: &TimelineStep) -> Self {
        Self {
            id: step.id,
            title: step.title.clone(),
            description: step.description.clone(),
            estimated_duration: step.estimated_duration.clone(),
            start_date: step.start_date.map(|t| t.to_rfc3339()),
            finish_date: step.finish_date.map(|t| t.to_rfc3339()),
            status: step.status,
            is_completed: step.is_completed(),
            is_in_progress: step.is_in_progress(),
            is_locked: step.is_locked(),
        }
    }
}

/// Full order view returned by every order endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    pub details: OrderDetailsResponse,
    pub status: OrderStatus,
    pub status_label: String,
    pub current_phase: String,
    pub progress: ProgressResponse,
    pub timeline: Vec<TimelineStepResponse>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        let progress = order.progress();
        Self {
            id: order.id().to_string(),
            order_id: order.order_id().to_string(),
            customer_id: order.customer_id().to_string(),
            details: order.details().into(),
            status: order.status(),
            status_label: order.status().to_string(),
            current_phase: order.current_phase().to_string(),
            progress: ProgressResponse {
                current: progress.current(),
                total: progress.total(),
                percentage: progress.percentage().value(),
            },
            timeline: order.timeline().iter().map(Into::into).collect(),
            created_by: order.created_by().to_string(),
            created_at: order.created_at().to_rfc3339(),
            updated_at: order.updated_at().to_rfc3339(),
        }
    }
}

/// Response for order deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrderResponse {
    pub order_id: String,
    pub message: String,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized.to_string(), message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError.to_string(), message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AdminId, OrderId};

    #[test]
    fn create_request_minimal_deserializes() {
        let json = r#"{
            "customer_id": "cust-1",
            "details": {"product_name": "Mugs", "quantity": 10, "total_amount": 50.0}
        }"#;
        let req: CreateOrderRequest = serde_json::from_str(json).unwrap();
        let draft = req.into_draft().unwrap();
        assert_eq!(draft.customer_id.as_str(), "cust-1");
        assert!(draft.status.is_none());
        assert!(draft.timeline.is_none());
    }

    #[test]
    fn create_request_parses_human_status() {
        let json = r#"{
            "customer_id": "cust-1",
            "details": {"product_name": "Mugs", "quantity": 10, "total_amount": 50.0},
            "status": "In Progress"
        }"#;
        let req: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.into_draft().unwrap().status, Some(OrderStatus::InProgress));
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let req = UpdateOrderRequest {
            status: Some("on hold".to_string()),
            ..Default::default()
        };
        assert_eq!(req.into_patch().unwrap_err().field(), "status");
    }

    #[test]
    fn blank_status_is_absent() {
        let req = UpdateOrderRequest {
            status: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(req.into_patch().unwrap().status.is_none());
    }

    #[test]
    fn blank_customer_is_rejected() {
        let req = UpdateOrderRequest {
            customer_id: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(req.into_patch().is_err());
    }

    #[test]
    fn step_request_accepts_flags_and_hyphenated_status() {
        let json = r#"[
            {"is_completed": true},
            {"status": "in-progress", "start_date": "2025-04-01T08:00:00Z"}
        ]"#;
        let steps: Vec<StepRequest> = serde_json::from_str(json).unwrap();
        let patches: Vec<StepPatch> = steps.into_iter().map(Into::into).collect();
        assert_eq!(patches[0].is_completed, Some(true));
        assert_eq!(patches[1].status, Some(StepStatus::InProgress));
        assert!(patches[1].start_date.is_some());
    }

    #[test]
    fn order_response_derives_step_flags() {
        let draft = OrderDraft::new(
            CustomerId::new("cust-1").unwrap(),
            OrderDetails {
                product_name: "Mugs".to_string(),
                quantity: 10,
                total_amount: 50.0,
                shipping_origin: None,
                shipping_destination: None,
                notes: None,
            },
        )
        .with_status(OrderStatus::Production);
        let order = Order::create(
            OrderId::from_parts(2025, 1),
            draft,
            AdminId::new("admin").unwrap(),
        )
        .unwrap();

        let response = OrderResponse::from(&order);

        assert_eq!(response.order_id, "ORD-2025-001");
        assert_eq!(response.status_label, "Production");
        assert_eq!(response.progress.current, 5);
        assert_eq!(response.progress.percentage, 71);
        let step = &response.timeline[4];
        assert!(step.is_in_progress && !step.is_completed && !step.is_locked);
        assert!(response.timeline[0].is_completed);
        assert!(response.timeline[6].is_locked);
    }

    #[test]
    fn error_response_skips_empty_details() {
        let json = serde_json::to_string(&ErrorResponse::unauthorized("nope")).unwrap();
        assert!(!json.contains("details"));
    }
}

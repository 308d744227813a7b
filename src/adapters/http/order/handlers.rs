//! HTTP handlers for order endpoints.
//!
//! These handlers connect Axum routes to the order command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::order::{
    AdvancePhaseCommand, AdvancePhaseHandler, CreateOrderCommand, CreateOrderHandler,
    DeleteOrderCommand, DeleteOrderHandler, GetOrderHandler, GetOrderQuery, OrderLocks,
    SetPhaseCommand, SetPhaseHandler, UpdateOrderCommand, UpdateOrderHandler,
};
use crate::domain::foundation::{AdminId, CommandMetadata, ErrorCode, OrderId, ValidationError};
use crate::domain::order::OrderError;
use crate::ports::{AdminActivityTracker, CustomerStatistics, OrderRepository};

use super::dto::{
    CreateOrderRequest, DeleteOrderResponse, ErrorResponse, HealthResponse, OrderResponse,
    SetPhaseRequest, UpdateOrderRequest,
};

/// Header carrying the acting administrator's id.
pub const ADMIN_ID_HEADER: &str = "X-Admin-Id";

/// Optional header propagated as the command correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state holding the order handlers.
#[derive(Clone)]
pub struct OrderAppState {
    create: Arc<CreateOrderHandler>,
    update: Arc<UpdateOrderHandler>,
    advance: Arc<AdvancePhaseHandler>,
    set_phase: Arc<SetPhaseHandler>,
    get: Arc<GetOrderHandler>,
    delete: Arc<DeleteOrderHandler>,
    verbose_errors: bool,
}

impl OrderAppState {
    /// Wires every handler to the given ports. All mutating handlers share
    /// one lock registry.
    pub fn new(
        order_repository: Arc<dyn OrderRepository>,
        customer_statistics: Arc<dyn CustomerStatistics>,
        admin_activity: Arc<dyn AdminActivityTracker>,
        max_order_id_attempts: u32,
    ) -> Self {
        let locks = OrderLocks::new();
        Self {
            create: Arc::new(CreateOrderHandler::new(
                order_repository.clone(),
                customer_statistics.clone(),
                admin_activity.clone(),
                max_order_id_attempts,
            )),
            update: Arc::new(UpdateOrderHandler::new(
                order_repository.clone(),
                customer_statistics.clone(),
                admin_activity.clone(),
                locks.clone(),
            )),
            advance: Arc::new(AdvancePhaseHandler::new(
                order_repository.clone(),
                admin_activity.clone(),
                locks.clone(),
            )),
            set_phase: Arc::new(SetPhaseHandler::new(
                order_repository.clone(),
                admin_activity,
                locks.clone(),
            )),
            get: Arc::new(GetOrderHandler::new(order_repository.clone())),
            delete: Arc::new(DeleteOrderHandler::new(
                order_repository,
                customer_statistics,
                locks,
            )),
            verbose_errors: false,
        }
    }

    /// Include internal error text in 500 responses.
    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin Context
// ════════════════════════════════════════════════════════════════════════════════

/// Administrator context extracted from request headers.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub admin_id: AdminId,
    pub request_id: Option<String>,
}

impl AdminUser {
    /// Command metadata for this request. Requests without an
    /// `X-Request-Id` get a fresh correlation id.
    fn metadata(self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.admin_id);
        let correlation_id = self
            .request_id
            .unwrap_or_else(|| metadata.correlation_id());
        metadata.with_correlation_id(correlation_id)
    }
}

/// Rejection type for AdminUser extraction.
pub struct AdminRequired;

impl IntoResponse for AdminRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::unauthorized("Administrator identity is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AdminRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let admin_id = parts
                .headers
                .get(ADMIN_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| AdminId::new(s.trim()).ok())
                .ok_or(AdminRequired)?;
            let request_id = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            Ok(AdminUser {
                admin_id,
                request_id,
            })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/orders - Create an order
pub async fn create_order(
    State(state): State<OrderAppState>,
    admin: AdminUser,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OrderApiError> {
    let Json(request) = payload?;
    let draft = request.into_draft()?;
    let result = state
        .create
        .handle(CreateOrderCommand { draft }, admin.metadata())
        .await
        .map_err(|e| OrderApiError::from_order(e, state.verbose_errors))?;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&result.order))))
}

/// PUT /api/orders/:order_id - Bulk update an order
pub async fn update_order(
    State(state): State<OrderAppState>,
    admin: AdminUser,
    Path(order_id): Path<String>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OrderApiError> {
    let order_id = parse_order_id(&order_id)?;
    let Json(request) = payload?;
    let patch = request.into_patch()?;
    let result = state
        .update
        .handle(UpdateOrderCommand { order_id, patch }, admin.metadata())
        .await
        .map_err(|e| OrderApiError::from_order(e, state.verbose_errors))?;

    Ok((StatusCode::OK, Json(OrderResponse::from(&result.order))))
}

/// POST /api/orders/:order_id/advance - Advance to the next phase
pub async fn advance_phase(
    State(state): State<OrderAppState>,
    admin: AdminUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, OrderApiError> {
    let order_id = parse_order_id(&order_id)?;
    let result = state
        .advance
        .handle(AdvancePhaseCommand { order_id }, admin.metadata())
        .await
        .map_err(|e| OrderApiError::from_order(e, state.verbose_errors))?;

    Ok((StatusCode::OK, Json(OrderResponse::from(&result.order))))
}

/// PUT /api/orders/:order_id/phase - Jump to a named phase
pub async fn set_phase(
    State(state): State<OrderAppState>,
    admin: AdminUser,
    Path(order_id): Path<String>,
    payload: Result<Json<SetPhaseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OrderApiError> {
    let order_id = parse_order_id(&order_id)?;
    let Json(request) = payload?;
    if request.phase.trim().is_empty() {
        return Err(ValidationError::empty_field("phase").into());
    }
    let cmd = SetPhaseCommand {
        order_id,
        phase: request.phase,
        progress: request.progress,
    };
    let result = state
        .set_phase
        .handle(cmd, admin.metadata())
        .await
        .map_err(|e| OrderApiError::from_order(e, state.verbose_errors))?;

    Ok((StatusCode::OK, Json(OrderResponse::from(&result.order))))
}

/// DELETE /api/orders/:order_id - Delete an order
pub async fn delete_order(
    State(state): State<OrderAppState>,
    admin: AdminUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, OrderApiError> {
    let order_id = parse_order_id(&order_id)?;
    let deleted = state
        .delete
        .handle(DeleteOrderCommand { order_id }, admin.metadata())
        .await
        .map_err(|e| OrderApiError::from_order(e, state.verbose_errors))?;

    let response = DeleteOrderResponse {
        order_id: deleted.to_string(),
        message: "Order deleted successfully".to_string(),
    };
    Ok((StatusCode::OK, Json(response)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/orders/:order_id - Get an order
pub async fn get_order(
    State(state): State<OrderAppState>,
    _admin: AdminUser,
    Path(order_id): Path<String>,
) -> Result<impl IntoResponse, OrderApiError> {
    let order_id = parse_order_id(&order_id)?;
    let order = state
        .get
        .handle(GetOrderQuery { order_id })
        .await
        .map_err(|e| OrderApiError::from_order(e, state.verbose_errors))?;

    Ok((StatusCode::OK, Json(OrderResponse::from(&order))))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn parse_order_id(raw: &str) -> Result<OrderId, OrderApiError> {
    OrderId::parse(raw).map_err(OrderApiError::from)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for order endpoints.
#[derive(Debug)]
pub struct OrderApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl OrderApiError {
    /// Maps an order error to its HTTP status. Server-side failures only
    /// carry their text when `verbose` is set.
    pub fn from_order(error: OrderError, verbose: bool) -> Self {
        let status = match &error {
            OrderError::Validation { .. }
            | OrderError::TerminalState(_)
            | OrderError::InvalidPhase(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::ConcurrentModification(_) => StatusCode::CONFLICT,
            OrderError::Persistence(_) | OrderError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let code = error.code().to_string();
        let body = if status.is_server_error() {
            tracing::error!(error = %error, "Order request failed");
            if verbose {
                ErrorResponse::new(code, error.message())
            } else {
                ErrorResponse::internal("An internal error occurred")
            }
        } else {
            let body = ErrorResponse::new(code, error.message());
            match &error {
                OrderError::Validation { field, .. } => {
                    body.with_details(serde_json::json!({ "field": field }))
                }
                _ => body,
            }
        };

        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<OrderError> for OrderApiError {
    fn from(error: OrderError) -> Self {
        Self::from_order(error, false)
    }
}

impl From<ValidationError> for OrderApiError {
    fn from(error: ValidationError) -> Self {
        OrderError::from(error).into()
    }
}

/// Unreadable or mistyped bodies are validation failures.
impl From<JsonRejection> for OrderApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(
                ErrorCode::ValidationFailed.to_string(),
                rejection.body_text(),
            ),
        }
    }
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

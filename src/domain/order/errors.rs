//! Order-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, ValidationError};

/// Order-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Malformed input, rejected before any state changed.
    Validation { field: String, message: String },
    /// No order with this identifier.
    NotFound(OrderId),
    /// The order admits no further phase transition.
    TerminalState(String),
    /// The requested phase is not one of the order's steps.
    InvalidPhase(String),
    /// Someone else wrote the order first.
    ConcurrentModification(String),
    /// Store unavailable or rejected the write.
    Persistence(String),
    /// Anything else that is our fault.
    Internal(String),
}

impl OrderError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OrderError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn not_found(id: OrderId) -> Self {
        OrderError::NotFound(id)
    }
    pub fn terminal_state(message: impl Into<String>) -> Self {
        OrderError::TerminalState(message.into())
    }
    pub fn invalid_phase(phase: impl Into<String>) -> Self {
        OrderError::InvalidPhase(phase.into())
    }
    pub fn concurrent_modification(message: impl Into<String>) -> Self {
        OrderError::ConcurrentModification(message.into())
    }
    pub fn persistence(message: impl Into<String>) -> Self {
        OrderError::Persistence(message.into())
    }
    pub fn internal(message: impl Into<String>) -> Self {
        OrderError::Internal(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::Validation { .. } => ErrorCode::ValidationFailed,
            OrderError::NotFound(_) => ErrorCode::OrderNotFound,
            OrderError::TerminalState(_) => ErrorCode::TerminalState,
            OrderError::InvalidPhase(_) => ErrorCode::InvalidPhase,
            OrderError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            OrderError::Persistence(_) => ErrorCode::DatabaseError,
            OrderError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            OrderError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            OrderError::NotFound(id) => format!("Order not found: {}", id),
            OrderError::TerminalState(msg) => format!("Order is in a terminal state: {}", msg),
            OrderError::InvalidPhase(phase) => {
                format!("'{}' is not a phase of this order", phase)
            }
            OrderError::ConcurrentModification(msg) => {
                format!("Order was modified concurrently: {}", msg)
            }
            OrderError::Persistence(msg) => format!("Storage error: {}", msg),
            OrderError::Internal(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OrderError {}

impl From<ValidationError> for OrderError {
    fn from(err: ValidationError) -> Self {
        OrderError::Validation {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for OrderError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => OrderError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::OrderNotFound => match err.details.get("order_id").map(OrderId::parse) {
                Some(Ok(id)) => OrderError::NotFound(id),
                _ => OrderError::Persistence(err.message),
            },
            ErrorCode::TerminalState => OrderError::TerminalState(err.message),
            ErrorCode::InvalidPhase => OrderError::InvalidPhase(err.message),
            ErrorCode::ConcurrentModification => OrderError::ConcurrentModification(err.message),
            ErrorCode::DatabaseError => OrderError::Persistence(err.message),
            _ => OrderError::Internal(err.to_string()),
        }
    }
}

//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the order tracking domain.

mod command;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AdminId, CustomerId, OrderId, RecordId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;

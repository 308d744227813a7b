//! HTTP adapter for the order module.
//!
//! # Endpoints
//!
//! - `POST /api/orders` - Create an order
//! - `GET|PUT|DELETE /api/orders/{order_id}` - Read, bulk update or delete
//! - `POST /api/orders/{order_id}/advance` - Advance one phase
//! - `PUT /api/orders/{order_id}/phase` - Jump to a named phase
//!
//! Every order endpoint requires the `X-Admin-Id` header.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{OrderApiError, OrderAppState};
pub use routes::order_router;

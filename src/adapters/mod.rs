//! Adapters - Implementations of port interfaces.
//!
//! - `http` - Axum REST endpoints
//! - `memory` - In-process stores for tests and local runs
//! - `postgres` - sqlx-backed stores

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::{InMemoryAdminActivity, InMemoryCustomerStatistics, InMemoryOrderRepository};
pub use postgres::{PostgresAdminActivity, PostgresCustomerStatistics, PostgresOrderRepository};

//! PostgreSQL adapters - Database implementations for the order ports.
//!
//! - `PostgresOrderRepository` - Version-checked order persistence
//! - `PostgresCustomerStatistics` - Per-customer order count and spend
//! - `PostgresAdminActivity` - Per-admin activity counters

mod admin_activity;
mod customer_statistics;
mod order_repository;

pub use admin_activity::PostgresAdminActivity;
pub use customer_statistics::PostgresCustomerStatistics;
pub use order_repository::PostgresOrderRepository;

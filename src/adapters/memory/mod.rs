//! In-memory adapters for tests and database-less local runs.

mod admin_activity;
mod customer_statistics;
mod order_repository;

pub use admin_activity::{AdminCounters, InMemoryAdminActivity};
pub use customer_statistics::{CustomerTotals, InMemoryCustomerStatistics};
pub use order_repository::InMemoryOrderRepository;

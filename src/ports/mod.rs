//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OrderRepository` - Order aggregate persistence
//! - `CustomerStatistics` - Derived per-customer order figures
//! - `AdminActivityTracker` - Per-admin activity counters

mod admin_activity;
mod customer_statistics;
mod order_repository;

pub use admin_activity::{AdminActivity, AdminActivityTracker};
pub use customer_statistics::CustomerStatistics;
pub use order_repository::OrderRepository;

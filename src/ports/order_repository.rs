//! Order repository port (write side).
//!
//! Defines the contract for persisting and retrieving Order aggregates.
//!
//! # Concurrency
//!
//! `update` is version-checked: implementations must only write when the
//! stored version equals `order.version()` and must then store the next
//! version. A mismatch is reported as `ConcurrentModification`.

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::order::Order;
use async_trait::async_trait;

/// Repository port for Order aggregate persistence.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Save a new order.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the order id is already taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, order: &Order) -> Result<(), DomainError>;

    /// Update an existing order, checking its version.
    ///
    /// # Errors
    ///
    /// - `OrderNotFound` if the order doesn't exist
    /// - `ConcurrentModification` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, order: &Order) -> Result<(), DomainError>;

    /// Find an order by its business identifier.
    ///
    /// Returns `None` if not found.
    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Check if an order id is taken.
    async fn exists(&self, order_id: &OrderId) -> Result<bool, DomainError>;

    /// Count orders created in the given calendar year.
    async fn count_for_year(&self, year: i32) -> Result<u32, DomainError>;

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// - `OrderNotFound` if the order doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, order_id: &OrderId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn OrderRepository) {}
    }
}

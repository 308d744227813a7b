//! Customer statistics port.
//!
//! Customers carry aggregate figures (order count, total spend) derived from
//! their orders. Handlers call `recompute` after any change that may move them.

use crate::domain::foundation::{CustomerId, DomainError};
use async_trait::async_trait;

/// Port for refreshing a customer's derived order statistics.
#[async_trait]
pub trait CustomerStatistics: Send + Sync {
    /// Recompute statistics for one customer from its current orders.
    ///
    /// Unknown customers are not an error; there is simply nothing to update.
    async fn recompute(&self, customer_id: &CustomerId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_statistics_is_object_safe() {
        fn _accepts_dyn(_stats: &dyn CustomerStatistics) {}
    }
}

//! OrderIdGenerator - Allocates free `ORD-YYYY-NNN` identifiers.

use std::sync::Arc;

use crate::domain::foundation::{OrderId, Timestamp};
use crate::domain::order::OrderError;
use crate::ports::OrderRepository;

/// Default bound on generate-and-check attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Generate-and-check allocator for business order ids.
///
/// The candidate sequence starts after the number of orders already created
/// this year and moves up one per taken candidate.
pub struct OrderIdGenerator {
    repository: Arc<dyn OrderRepository>,
    max_attempts: u32,
}

impl OrderIdGenerator {
    pub fn new(repository: Arc<dyn OrderRepository>, max_attempts: u32) -> Self {
        Self {
            repository,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns an id not yet present in the repository.
    ///
    /// # Errors
    ///
    /// - `Internal` when every candidate within the attempt bound is taken
    /// - `Persistence` when the repository fails
    pub async fn next_id(&self, now: Timestamp) -> Result<OrderId, OrderError> {
        let year = now.year();
        let base = self.repository.count_for_year(year).await? + 1;

        for attempt in 0..self.max_attempts {
            let candidate = OrderId::from_parts(year, base + attempt);
            if !self.repository.exists(&candidate).await? {
                return Ok(candidate);
            }
            tracing::debug!(order_id = %candidate, attempt, "Order id taken, trying next");
        }

        tracing::error!(year, attempts = self.max_attempts, "Could not allocate an order id");
        Err(OrderError::internal(format!(
            "no free order id for {} after {} attempts",
            year, self.max_attempts
        )))
    }
}

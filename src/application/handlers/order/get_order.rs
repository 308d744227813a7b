//! GetOrderHandler - Query handler for a single order.

use std::sync::Arc;

use crate::domain::foundation::OrderId;
use crate::domain::order::{Order, OrderError};
use crate::ports::OrderRepository;

/// Query to get an order by its business id.
#[derive(Debug, Clone)]
pub struct GetOrderQuery {
    pub order_id: OrderId,
}

/// Handler for retrieving orders.
pub struct GetOrderHandler {
    repository: Arc<dyn OrderRepository>,
}

impl GetOrderHandler {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetOrderQuery) -> Result<Order, OrderError> {
        self.repository
            .find_by_order_id(&query.order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(query.order_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;

    struct BrokenRepository;

    #[async_trait]
    impl OrderRepository for BrokenRepository {
        async fn save(&self, _order: &Order) -> Result<(), DomainError> {
            Ok(())
        }
        async fn update(&self, _order: &Order) -> Result<(), DomainError> {
            Ok(())
        }
        async fn find_by_order_id(&self, _id: &OrderId) -> Result<Option<Order>, DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "pool timed out"))
        }
        async fn exists(&self, _id: &OrderId) -> Result<bool, DomainError> {
            Ok(false)
        }
        async fn count_for_year(&self, _year: i32) -> Result<u32, DomainError> {
            Ok(0)
        }
        async fn delete(&self, _id: &OrderId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let handler = GetOrderHandler::new(Arc::new(
            crate::adapters::memory::InMemoryOrderRepository::new(),
        ));
        let err = handler
            .handle(GetOrderQuery {
                order_id: OrderId::from_parts(2025, 5),
            })
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::NotFound(OrderId::from_parts(2025, 5)));
    }

    #[tokio::test]
    async fn storage_failure_is_persistence_error() {
        let handler = GetOrderHandler::new(Arc::new(BrokenRepository));
        let err = handler
            .handle(GetOrderQuery {
                order_id: OrderId::from_parts(2025, 5),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Persistence(_)));
    }
}

//! PostgreSQL implementation of CustomerStatistics.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{CustomerId, DomainError, ErrorCode};
use crate::ports::CustomerStatistics;

/// Rewrites a customer's order count and spend from the `orders` table.
#[derive(Clone)]
pub struct PostgresCustomerStatistics {
    pool: PgPool,
}

impl PostgresCustomerStatistics {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStatistics for PostgresCustomerStatistics {
    async fn recompute(&self, customer_id: &CustomerId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, order_count, total_spent, updated_at)
            SELECT $1, COUNT(*), COALESCE(SUM(total_amount), 0), NOW()
            FROM orders
            WHERE customer_id = $1
            ON CONFLICT (id) DO UPDATE SET
                order_count = EXCLUDED.order_count,
                total_spent = EXCLUDED.total_spent,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(customer_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to recompute customer statistics: {}", e),
            )
        })?;

        Ok(())
    }
}

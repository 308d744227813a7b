//! PostgreSQL implementation of OrderRepository.
//!
//! Orders live in a single `orders` row each; the timeline is stored as
//! JSONB because it is always read and written whole.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    AdminId, CustomerId, DomainError, ErrorCode, OrderId, RecordId, Timestamp,
};
use crate::domain::order::{Order, OrderDetails, OrderStatus, Progress, TimelineStep};
use crate::ports::OrderRepository;

/// PostgreSQL implementation of OrderRepository.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgresOrderRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, order_id, customer_id, created_by,
           product_name, quantity, total_amount,
           shipping_origin, shipping_destination, notes,
           status, current_phase, progress_current, progress_total,
           timeline, created_at, updated_at, version
    FROM orders
"#;

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), DomainError> {
        let details = order.details();
        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_id, customer_id, created_by,
                product_name, quantity, total_amount,
                shipping_origin, shipping_destination, notes,
                status, current_phase, progress_current, progress_total,
                timeline, created_at, updated_at, version
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9,
                $10, $11, $12, $13, $14, $15, $16, $17, $18
            )
            "#,
        )
        .bind(order.id().as_uuid())
        .bind(order.order_id().as_str())
        .bind(order.customer_id().as_str())
        .bind(order.created_by().as_str())
        .bind(&details.product_name)
        .bind(i64::from(details.quantity))
        .bind(details.total_amount)
        .bind(&details.shipping_origin)
        .bind(&details.shipping_destination)
        .bind(&details.notes)
        .bind(order.status().as_str())
        .bind(order.current_phase())
        .bind(i16::from(order.progress().current()))
        .bind(i16::from(order.progress().total()))
        .bind(Json(order.timeline()))
        .bind(order.created_at().as_datetime())
        .bind(order.updated_at().as_datetime())
        .bind(order.version())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Order id already taken: {}", order.order_id()),
            )
            .with_detail("field", "order_id"),
            other => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert order: {}", other),
            ),
        })?;

        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let details = order.details();
        let result = sqlx::query(
            r#"
            UPDATE orders SET
                customer_id = $3,
                product_name = $4,
                quantity = $5,
                total_amount = $6,
                shipping_origin = $7,
                shipping_destination = $8,
                notes = $9,
                status = $10,
                current_phase = $11,
                progress_current = $12,
                progress_total = $13,
                timeline = $14,
                updated_at = $15,
                version = version + 1
            WHERE order_id = $1 AND version = $2
            "#,
        )
        .bind(order.order_id().as_str())
        .bind(order.version())
        .bind(order.customer_id().as_str())
        .bind(&details.product_name)
        .bind(i64::from(details.quantity))
        .bind(details.total_amount)
        .bind(&details.shipping_origin)
        .bind(&details.shipping_destination)
        .bind(&details.notes)
        .bind(order.status().as_str())
        .bind(order.current_phase())
        .bind(i16::from(order.progress().current()))
        .bind(i16::from(order.progress().total()))
        .bind(Json(order.timeline()))
        .bind(order.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update order: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            if self.exists(order.order_id()).await? {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    format!(
                        "Order {} changed since version {}",
                        order.order_id(),
                        order.version()
                    ),
                ));
            }
            return Err(not_found(order.order_id()));
        }

        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE order_id = $1", SELECT_COLUMNS))
            .bind(order_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch order: {}", e),
                )
            })?;

        row.map(row_to_order).transpose()
    }

    async fn exists(&self, order_id: &OrderId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE order_id = $1")
            .bind(order_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check order existence: {}", e),
                )
            })?;

        Ok(result.0 > 0)
    }

    async fn count_for_year(&self, year: i32) -> Result<u32, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE EXTRACT(YEAR FROM created_at AT TIME ZONE 'UTC') = $1",
        )
        .bind(year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count orders for {}: {}", year, e),
            )
        })?;

        Ok(result.0 as u32)
    }

    async fn delete(&self, order_id: &OrderId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(order_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete order: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(order_id));
        }

        Ok(())
    }
}

fn not_found(order_id: &OrderId) -> DomainError {
    DomainError::new(
        ErrorCode::OrderNotFound,
        format!("Order not found: {}", order_id),
    )
    .with_detail("order_id", order_id.as_str())
}

fn decode_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to decode orders.{}: {}", column, e),
    )
}

/// Convert a database row to an Order aggregate.
fn row_to_order(row: PgRow) -> Result<Order, DomainError> {
    let get_str = |column: &str| -> Result<String, DomainError> {
        row.try_get::<String, _>(column)
            .map_err(|e| decode_error(column, e))
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| decode_error("id", e))?;
    let order_id = OrderId::parse(get_str("order_id")?).map_err(|e| decode_error("order_id", e))?;
    let customer_id =
        CustomerId::new(get_str("customer_id")?).map_err(|e| decode_error("customer_id", e))?;
    let created_by =
        AdminId::new(get_str("created_by")?).map_err(|e| decode_error("created_by", e))?;

    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| decode_error("quantity", e))?;
    let details = OrderDetails {
        product_name: get_str("product_name")?,
        quantity: u32::try_from(quantity).map_err(|e| decode_error("quantity", e))?,
        total_amount: row
            .try_get("total_amount")
            .map_err(|e| decode_error("total_amount", e))?,
        shipping_origin: row
            .try_get("shipping_origin")
            .map_err(|e| decode_error("shipping_origin", e))?,
        shipping_destination: row
            .try_get("shipping_destination")
            .map_err(|e| decode_error("shipping_destination", e))?,
        notes: row.try_get("notes").map_err(|e| decode_error("notes", e))?,
    };

    let status: OrderStatus = get_str("status")?
        .parse()
        .map_err(|e| decode_error("status", e))?;
    let current: i16 = row
        .try_get("progress_current")
        .map_err(|e| decode_error("progress_current", e))?;
    let total: i16 = row
        .try_get("progress_total")
        .map_err(|e| decode_error("progress_total", e))?;
    let progress = Progress::new(
        u8::try_from(current).map_err(|e| decode_error("progress_current", e))?,
        u8::try_from(total).map_err(|e| decode_error("progress_total", e))?,
    )
    .map_err(|e| decode_error("progress", e))?;

    let Json(timeline): Json<Vec<TimelineStep>> = row
        .try_get("timeline")
        .map_err(|e| decode_error("timeline", e))?;

    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| decode_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| decode_error("updated_at", e))?;
    let version: i64 = row
        .try_get("version")
        .map_err(|e| decode_error("version", e))?;

    Ok(Order::reconstitute(
        RecordId::from_uuid(id),
        order_id,
        customer_id,
        details,
        status,
        get_str("current_phase")?,
        progress,
        timeline,
        created_by,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
        version,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_order_detail() {
        let err = not_found(&OrderId::from_parts(2025, 3));
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(
            err.details.get("order_id").map(String::as_str),
            Some("ORD-2025-003")
        );
    }

    #[test]
    fn decode_error_names_column() {
        let err = decode_error("status", "bad value");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("orders.status"));
    }
}

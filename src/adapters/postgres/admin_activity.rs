//! PostgreSQL implementation of AdminActivityTracker.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{AdminId, DomainError, ErrorCode};
use crate::ports::{AdminActivity, AdminActivityTracker};

/// Increments per-admin counters in the `admins` table.
#[derive(Clone)]
pub struct PostgresAdminActivity {
    pool: PgPool,
}

impl PostgresAdminActivity {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminActivityTracker for PostgresAdminActivity {
    async fn record_activity(
        &self,
        admin_id: &AdminId,
        activity: AdminActivity,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, orders_created, orders_modified, last_active)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE SET
                orders_created = admins.orders_created + EXCLUDED.orders_created,
                orders_modified = admins.orders_modified + EXCLUDED.orders_modified,
                last_active = EXCLUDED.last_active
            "#,
        )
        .bind(admin_id.as_str())
        .bind(i64::from(activity.orders_created))
        .bind(i64::from(activity.orders_modified))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record admin activity: {}", e),
            )
        })?;

        Ok(())
    }
}

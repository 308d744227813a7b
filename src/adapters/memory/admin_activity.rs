//! In-memory admin activity counters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{AdminId, DomainError, Timestamp};
use crate::ports::{AdminActivity, AdminActivityTracker};

/// Per-admin counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminCounters {
    pub orders_created: u32,
    pub orders_modified: u32,
    pub last_active: Option<Timestamp>,
}

/// [`AdminActivityTracker`] that keeps counters in memory.
#[derive(Clone, Default)]
pub struct InMemoryAdminActivity {
    counters: Arc<RwLock<HashMap<String, AdminCounters>>>,
}

impl InMemoryAdminActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn counters_for(&self, admin_id: &AdminId) -> AdminCounters {
        self.counters
            .read()
            .await
            .get(admin_id.as_str())
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl AdminActivityTracker for InMemoryAdminActivity {
    async fn record_activity(
        &self,
        admin_id: &AdminId,
        activity: AdminActivity,
    ) -> Result<(), DomainError> {
        let mut counters = self.counters.write().await;
        let entry = counters.entry(admin_id.as_str().to_string()).or_default();
        if activity.orders_created {
            entry.orders_created += 1;
        }
        if activity.orders_modified {
            entry.orders_modified += 1;
        }
        entry.last_active = Some(Timestamp::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_each_kind_of_activity() {
        let tracker = InMemoryAdminActivity::new();
        let admin = AdminId::new("admin-7").unwrap();

        tracker.record_activity(&admin, AdminActivity::order_created()).await.unwrap();
        tracker.record_activity(&admin, AdminActivity::order_modified()).await.unwrap();
        tracker.record_activity(&admin, AdminActivity::order_modified()).await.unwrap();

        let counters = tracker.counters_for(&admin).await;
        assert_eq!(counters.orders_created, 1);
        assert_eq!(counters.orders_modified, 2);
        assert!(counters.last_active.is_some());
    }

    #[tokio::test]
    async fn unknown_admin_has_zero_counters() {
        let tracker = InMemoryAdminActivity::new();
        let counters = tracker.counters_for(&AdminId::new("ghost").unwrap()).await;
        assert_eq!(counters, AdminCounters::default());
    }
}

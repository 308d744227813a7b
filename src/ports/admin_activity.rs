//! Admin activity tracker port.

use crate::domain::foundation::{AdminId, DomainError};
use async_trait::async_trait;

/// Which counters an admin action bumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminActivity {
    pub orders_created: bool,
    pub orders_modified: bool,
}

impl AdminActivity {
    pub fn order_created() -> Self {
        Self {
            orders_created: true,
            orders_modified: false,
        }
    }

    pub fn order_modified() -> Self {
        Self {
            orders_created: false,
            orders_modified: true,
        }
    }
}

/// Port for recording what an administrator did.
#[async_trait]
pub trait AdminActivityTracker: Send + Sync {
    /// Record one activity and touch the admin's last-active time.
    async fn record_activity(
        &self,
        admin_id: &AdminId,
        activity: AdminActivity,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_activity_tracker_is_object_safe() {
        fn _accepts_dyn(_tracker: &dyn AdminActivityTracker) {}
    }

    #[test]
    fn constructors_set_single_flag() {
        assert_eq!(
            AdminActivity::order_created(),
            AdminActivity {
                orders_created: true,
                orders_modified: false
            }
        );
        assert!(AdminActivity::order_modified().orders_modified);
        assert!(!AdminActivity::default().orders_created);
    }
}

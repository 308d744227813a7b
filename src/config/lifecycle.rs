//! Order lifecycle tuning

use serde::Deserialize;

use super::error::ValidationError;

/// Knobs for order creation.
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleConfig {
    /// How many candidate order ids to probe before giving up.
    #[serde(default = "default_max_order_id_attempts")]
    pub max_order_id_attempts: u32,
}

impl LifecycleConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Sequence numbers are three digits.
        if self.max_order_id_attempts == 0 || self.max_order_id_attempts > 999 {
            return Err(ValidationError::InvalidOrderIdAttempts);
        }
        Ok(())
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_order_id_attempts: default_max_order_id_attempts(),
        }
    }
}

fn default_max_order_id_attempts() -> u32 {
    crate::application::handlers::order::DEFAULT_MAX_ATTEMPTS
}

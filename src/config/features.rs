//! Feature flags configuration

use serde::Deserialize;

/// Runtime switches
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Put internal error text into 500 responses (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,

    /// Wrap the router in a request-tracing layer
    #[serde(default = "default_enable_tracing")]
    pub enable_tracing: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            verbose_errors: false,
            enable_tracing: default_enable_tracing(),
        }
    }
}

fn default_enable_tracing() -> bool {
    true
}

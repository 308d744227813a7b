//! Command infrastructure for application handlers.
//!
//! Every mutating handler accepts a `CommandMetadata` alongside its command
//! instead of loose `admin_id` / `correlation_id` parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AdminId;

/// Metadata context for command handlers.
///
/// Carries the acting administrator and a correlation id through the
/// command pipeline so that log lines of one request can be joined up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The administrator executing this command.
    pub admin_id: AdminId,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata with the acting administrator.
    pub fn new(admin_id: AdminId) -> Self {
        Self {
            admin_id,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture with a test admin ID.
    pub fn test_fixture() -> Self {
        Self::new(AdminId::new("test-admin").unwrap()).with_correlation_id("test-correlation-id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_with_admin_id() {
        let admin_id = AdminId::new("admin-123").unwrap();
        let metadata = CommandMetadata::new(admin_id.clone());

        assert_eq!(metadata.admin_id, admin_id);
        assert!(metadata.correlation_id_opt().is_none());
    }

    #[test]
    fn correlation_id_generates_if_missing() {
        let metadata = CommandMetadata::new(AdminId::new("admin").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn correlation_id_returns_set_value() {
        let metadata = CommandMetadata::new(AdminId::new("admin").unwrap())
            .with_correlation_id("req-42");

        assert_eq!(metadata.correlation_id(), "req-42");
        assert_eq!(metadata.correlation_id_opt(), Some("req-42"));
    }

    #[test]
    fn serialization_skips_none_fields() {
        let metadata = CommandMetadata::new(AdminId::new("admin").unwrap());
        let json = serde_json::to_string(&metadata).unwrap();

        assert!(json.contains("admin_id"));
        assert!(!json.contains("correlation_id"));
    }
}

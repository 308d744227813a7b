//! OrderStatus enum - the coarse, externally visible order state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle status of an order.
///
/// Derived from the progress cursor except for `Cancelled`, which is only
/// ever set by an explicit override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Development,
    InProgress,
    Production,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Returns true if the order was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Returns the storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Development => "development",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Production => "production",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Lowercases and drops whitespace, `_` and `-` so that "In Progress",
/// "in_progress", "IN-PROGRESS" and "InProgress" compare equal.
pub(crate) fn normalize_status_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_status_label(s).as_str() {
            "development" => Ok(OrderStatus::Development),
            "inprogress" => Ok(OrderStatus::InProgress),
            "production" => Ok(OrderStatus::Production),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(ValidationError::invalid_format(
                "status",
                format!("unknown order status '{}'", s.trim()),
            )),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Development => "Development",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Production => "Production",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}

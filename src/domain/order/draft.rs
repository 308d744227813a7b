//! Typed inputs to the order lifecycle.
//!
//! `OrderDraft` carries everything a caller may say when creating an order,
//! `OrderPatch` everything it may say when updating one. Every attribute is an
//! `Option` so that "not supplied" is distinct from any value; the aggregate
//! merges them onto its state without touching the inputs.

use crate::domain::foundation::{CustomerId, ValidationError};

use super::{OrderStatus, StepPatch};

/// Maximum length of the free-text notes field.
pub const MAX_NOTES_LENGTH: usize = 2000;

/// Product and shipping details. Opaque to the lifecycle rules.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub product_name: String,
    pub quantity: u32,
    pub total_amount: f64,
    pub shipping_origin: Option<String>,
    pub shipping_destination: Option<String>,
    pub notes: Option<String>,
}

impl OrderDetails {
    /// Checks field-level constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_name.trim().is_empty() {
            return Err(ValidationError::empty_field("details.product_name"));
        }
        if self.quantity == 0 {
            return Err(ValidationError::out_of_range(
                "details.quantity",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        if !self.total_amount.is_finite() || self.total_amount < 0.0 {
            return Err(ValidationError::invalid_format(
                "details.total_amount",
                "must be a non-negative number",
            ));
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LENGTH {
                return Err(ValidationError::out_of_range(
                    "details.notes",
                    0,
                    MAX_NOTES_LENGTH as i64,
                    notes.chars().count() as i64,
                ));
            }
        }
        Ok(())
    }

    /// Returns a copy with every supplied patch field applied.
    pub fn merged(&self, patch: &DetailsPatch) -> Self {
        Self {
            product_name: patch
                .product_name
                .clone()
                .unwrap_or_else(|| self.product_name.clone()),
            quantity: patch.quantity.unwrap_or(self.quantity),
            total_amount: patch.total_amount.unwrap_or(self.total_amount),
            shipping_origin: patch
                .shipping_origin
                .clone()
                .or_else(|| self.shipping_origin.clone()),
            shipping_destination: patch
                .shipping_destination
                .clone()
                .or_else(|| self.shipping_destination.clone()),
            notes: patch.notes.clone().or_else(|| self.notes.clone()),
        }
    }
}

/// Partial update of [`OrderDetails`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailsPatch {
    pub product_name: Option<String>,
    pub quantity: Option<u32>,
    pub total_amount: Option<f64>,
    pub shipping_origin: Option<String>,
    pub shipping_destination: Option<String>,
    pub notes: Option<String>,
}

/// Caller-declared progress. Values are raw so that out-of-range input can
/// be clamped or rejected by the lifecycle rather than by the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressPatch {
    pub current: Option<i64>,
    pub total: Option<i64>,
}

/// Input to order creation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub customer_id: CustomerId,
    pub details: OrderDetails,
    pub status: Option<OrderStatus>,
    pub current_phase: Option<String>,
    pub progress: Option<ProgressPatch>,
    pub timeline: Option<Vec<StepPatch>>,
}

impl OrderDraft {
    /// Creates a draft with only the required fields.
    pub fn new(customer_id: CustomerId, details: OrderDetails) -> Self {
        Self {
            customer_id,
            details,
            status: None,
            current_phase: None,
            progress: None,
            timeline: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_progress(mut self, progress: ProgressPatch) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn with_timeline(mut self, timeline: Vec<StepPatch>) -> Self {
        self.timeline = Some(timeline);
        self
    }

    pub fn with_current_phase(mut self, phase: impl Into<String>) -> Self {
        self.current_phase = Some(phase.into());
        self
    }

    /// The supplied timeline, treating an empty list as absent.
    pub fn provided_timeline(&self) -> Option<&[StepPatch]> {
        self.timeline.as_deref().filter(|t| !t.is_empty())
    }
}

/// Input to a bulk update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub customer_id: Option<CustomerId>,
    pub details: DetailsPatch,
    pub status: Option<OrderStatus>,
    pub current_phase: Option<String>,
    pub progress: Option<ProgressPatch>,
    pub timeline: Option<Vec<StepPatch>>,
}

impl OrderPatch {
    /// Returns true when the patch touches customer-level statistics.
    pub fn affects_customer_totals(&self) -> bool {
        self.customer_id.is_some() || self.details.total_amount.is_some()
    }
}

/// Trims a caller-supplied label, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

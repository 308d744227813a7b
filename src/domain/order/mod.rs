//! Order module - Order aggregate and its timeline state machine.
//!
//! An order moves through seven fixed phases. Three things describe where it
//! is: the step list (`timeline`), the numeric cursor (`progress`) and the
//! coarse `status`. This module keeps them consistent.
//!
//! # Components
//!
//! - `TimelineTemplate` - canonical step definitions
//! - `TimelineEngine` - pure timeline build/normalize/sweep functions
//! - `ProgressStatusMapper` - cursor or percentage to status
//! - `Order` - the aggregate tying them together

mod aggregate;
mod draft;
mod errors;
mod events;
mod order_status;
mod progress;
mod status_mapper;
mod step_status;
mod template;
mod timeline;

pub use aggregate::Order;
pub use draft::{DetailsPatch, OrderDetails, OrderDraft, OrderPatch, ProgressPatch, MAX_NOTES_LENGTH};
pub use errors::OrderError;
pub use events::OrderEvent;
pub use order_status::OrderStatus;
pub use progress::Progress;
pub use status_mapper::ProgressStatusMapper;
pub use step_status::StepStatus;
pub use template::{StepTemplate, TimelineTemplate};
pub use timeline::{StepPatch, TimelineEngine, TimelineStep};

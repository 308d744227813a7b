//! Order aggregate entity.
//!
//! The order owns its timeline outright. Every mutation path runs the
//! timeline engine and status mapper so that the step list, the progress
//! cursor and the coarse status leave each call mutually consistent.
//!
//! # Mutation paths
//!
//! - `create` is cursor-driven: the cursor comes from the caller's status
//!   or progress and the timeline is built around it.
//! - `apply_update` is timeline-driven: the cursor is derived from the
//!   caller's step flags unless it is given explicitly.
//! - `advance_phase` and `set_phase` move the cursor and re-derive the rest.

use crate::domain::foundation::{AdminId, CustomerId, OrderId, RecordId, Timestamp};

use super::draft::non_blank;
use super::{
    OrderDetails, OrderDraft, OrderError, OrderEvent, OrderPatch, OrderStatus, Progress,
    ProgressStatusMapper, StepStatus, TimelineEngine, TimelineStep, TimelineTemplate,
};

/// Order aggregate.
///
/// # Invariants
///
/// - `timeline` has exactly seven steps
/// - `0 <= progress.current <= progress.total`
/// - `current_phase` is never empty
/// - failed mutations leave the order untouched
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: RecordId,
    order_id: OrderId,
    customer_id: CustomerId,
    details: OrderDetails,
    status: OrderStatus,
    current_phase: String,
    progress: Progress,
    timeline: Vec<TimelineStep>,
    created_by: AdminId,
    created_at: Timestamp,
    updated_at: Timestamp,

    /// Row version as last read from or written to storage.
    version: i64,

    domain_events: Vec<OrderEvent>,
}

impl Order {
    /// Creates a new order from a draft.
    ///
    /// # Errors
    ///
    /// - `Validation` if details are invalid or the declared total is out of range
    pub fn create(
        order_id: OrderId,
        draft: OrderDraft,
        created_by: AdminId,
    ) -> Result<Self, OrderError> {
        draft.details.validate()?;

        let total = match draft.progress.and_then(|p| p.total) {
            Some(total) => Progress::validate_total(total)?,
            None => TimelineTemplate::STANDARD_TOTAL,
        };
        let explicit_current = draft.progress.and_then(|p| p.current);

        let (progress, timeline) = match draft.provided_timeline() {
            None => {
                let cursor = explicit_current.unwrap_or_else(|| {
                    i64::from(TimelineEngine::resolve_initial_progress(
                        draft.status.map(|s| s.as_str()),
                    ))
                });
                let progress = Progress::clamped(cursor, total, 1);
                let timeline =
                    TimelineEngine::build_default_timeline(progress.active_index().unwrap_or(0));
                (progress, timeline)
            }
            // Caller timelines are shape-normalized only; their statuses stand.
            Some(input) => (
                Progress::clamped(explicit_current.unwrap_or(1), total, 1),
                TimelineEngine::normalize_provided_timeline(input),
            ),
        };

        let current_phase = non_blank(draft.current_phase.as_deref())
            .unwrap_or_else(|| TimelineEngine::phase_title_at(&timeline, progress.current()));
        let status = draft
            .status
            .unwrap_or_else(|| ProgressStatusMapper::for_progress(&progress));

        let now = Timestamp::now();
        let mut order = Self {
            id: RecordId::new(),
            order_id,
            customer_id: draft.customer_id,
            details: draft.details,
            status,
            current_phase,
            progress,
            timeline,
            created_by,
            created_at: now,
            updated_at: now,
            version: 0,
            domain_events: Vec::new(),
        };

        order.record(OrderEvent::Created {
            order_id: order.order_id.clone(),
            customer_id: order.customer_id.clone(),
            created_by: order.created_by.clone(),
            status: order.status,
            current: order.progress.current(),
            occurred_at: now,
        });

        Ok(order)
    }

    /// Reconstitutes an order from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: RecordId,
        order_id: OrderId,
        customer_id: CustomerId,
        details: OrderDetails,
        status: OrderStatus,
        current_phase: String,
        progress: Progress,
        timeline: Vec<TimelineStep>,
        created_by: AdminId,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: i64,
    ) -> Self {
        Self {
            id,
            order_id,
            customer_id,
            details,
            status,
            current_phase,
            progress,
            timeline,
            created_by,
            created_at,
            updated_at,
            version,
            domain_events: Vec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn details(&self) -> &OrderDetails {
        &self.details
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Title of the step the cursor points at.
    pub fn current_phase(&self) -> &str {
        &self.current_phase
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn timeline(&self) -> &[TimelineStep] {
        &self.timeline
    }

    pub fn created_by(&self) -> &AdminId {
        &self.created_by
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    /// Marks the order as written once more. Used by repositories after a
    /// successful version-checked update.
    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a bulk update.
    ///
    /// A supplied timeline is normalized, the cursor derived from its flags
    /// (unless given) and the timeline re-swept around it. Progress alone
    /// re-sweeps the existing timeline. Status is re-derived by percentage
    /// only when progress changed and no explicit status was supplied.
    ///
    /// # Errors
    ///
    /// - `Validation` if merged details are invalid or the total is out of range
    pub fn apply_update(&mut self, patch: &OrderPatch) -> Result<(), OrderError> {
        let details = self.details.merged(&patch.details);
        details.validate()?;

        let total = match patch.progress.and_then(|p| p.total) {
            Some(total) => Progress::validate_total(total)?,
            None => self.progress.total(),
        };
        let explicit_current = patch.progress.and_then(|p| p.current);
        let explicit_phase = non_blank(patch.current_phase.as_deref());
        let now = Timestamp::now();
        let previous = self.progress;

        let provided = patch.timeline.as_deref().filter(|t| !t.is_empty());
        let resweep = match provided {
            Some(input) => {
                let normalized = TimelineEngine::normalize_provided_timeline(input);
                let cursor = explicit_current.unwrap_or_else(|| {
                    i64::from(TimelineEngine::recompute_progress_from_flags(
                        &normalized,
                        total,
                    ))
                });
                Some((normalized, Progress::clamped(cursor, total, 1)))
            }
            None if patch.progress.is_some() => {
                let cursor = explicit_current.unwrap_or(i64::from(self.progress.current()));
                Some((self.timeline.clone(), Progress::clamped(cursor, total, 1)))
            }
            None => None,
        };

        if let Some((base, progress)) = resweep {
            let mut timeline = TimelineEngine::enforce_single_active_step(&base, progress.current());
            TimelineEngine::stamp_missing_dates(&mut timeline, now);
            self.current_phase = explicit_phase
                .unwrap_or_else(|| TimelineEngine::phase_title_at(&timeline, progress.current()));
            self.timeline = timeline;
            self.progress = progress;
        } else if let Some(phase) = explicit_phase {
            self.current_phase = phase;
        }

        let progress_changed = self.progress != previous;
        if let Some(status) = patch.status {
            self.status = status;
        } else if progress_changed {
            self.status =
                ProgressStatusMapper::from_percentage(self.progress.current(), self.progress.total());
        }

        if let Some(customer_id) = &patch.customer_id {
            self.customer_id = customer_id.clone();
        }
        self.details = details;
        self.updated_at = now;

        self.record(OrderEvent::Updated {
            order_id: self.order_id.clone(),
            progress_changed,
            status: self.status,
            current: self.progress.current(),
            occurred_at: now,
        });

        Ok(())
    }

    /// Moves the cursor forward by exactly one step.
    ///
    /// # Errors
    ///
    /// - `TerminalState` if the order is cancelled or already at its last step
    pub fn advance_phase(&mut self) -> Result<(), OrderError> {
        if self.status.is_cancelled() {
            return Err(OrderError::terminal_state(format!(
                "order {} is cancelled",
                self.order_id
            )));
        }
        if self.progress.is_final() {
            return Err(OrderError::terminal_state(format!(
                "order {} is already at its final phase",
                self.order_id
            )));
        }

        let now = Timestamp::now();
        let from = self.progress.current();
        let to = from + 1;

        if let Some(index) = self.progress.active_index() {
            if let Some(step) = self.timeline.get_mut(index) {
                step.status = StepStatus::Completed;
                step.start_date.get_or_insert(now);
                step.finish_date = Some(now);
            }
        }
        if let Some(step) = self.timeline.get_mut(usize::from(to) - 1) {
            step.status = StepStatus::InProgress;
            step.start_date = Some(now);
            step.finish_date = None;
        }

        self.progress = Progress::clamped(i64::from(to), self.progress.total(), 0);
        self.current_phase = TimelineEngine::phase_title_at(&self.timeline, to);
        self.status = ProgressStatusMapper::from_cursor(to);
        self.updated_at = now;

        self.record(OrderEvent::PhaseAdvanced {
            order_id: self.order_id.clone(),
            from,
            to,
            phase: self.current_phase.clone(),
            status: self.status,
            occurred_at: now,
        });

        Ok(())
    }

    /// Jumps to the step titled `phase`, in either direction.
    ///
    /// # Errors
    ///
    /// - `InvalidPhase` if no step carries that title
    /// - `TerminalState` if the order is cancelled
    pub fn set_phase(
        &mut self,
        phase: &str,
        explicit_progress: Option<i64>,
    ) -> Result<(), OrderError> {
        let title = phase.trim();
        let index = TimelineEngine::position_of(&self.timeline, title)
            .ok_or_else(|| OrderError::invalid_phase(title))?;
        if self.status.is_cancelled() {
            return Err(OrderError::terminal_state(format!(
                "order {} is cancelled",
                self.order_id
            )));
        }

        let now = Timestamp::now();
        let cursor = explicit_progress.unwrap_or(index as i64 + 1);
        let progress = Progress::clamped(cursor, self.progress.total(), 0);

        let mut timeline =
            TimelineEngine::enforce_single_active_step(&self.timeline, progress.current());
        TimelineEngine::stamp_missing_dates(&mut timeline, now);

        self.timeline = timeline;
        self.progress = progress;
        self.current_phase = title.to_string();
        self.status = ProgressStatusMapper::from_cursor(progress.current());
        self.updated_at = now;

        self.record(OrderEvent::PhaseSet {
            order_id: self.order_id.clone(),
            phase: self.current_phase.clone(),
            current: progress.current(),
            status: self.status,
            occurred_at: now,
        });

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.domain_events)
    }

    fn record(&mut self, event: OrderEvent) {
        self.domain_events.push(event);
    }
}

//! TimelineEngine - Builds, normalizes and re-derives order timelines.
//!
//! All functions here are pure: they take a timeline (or partial input) and
//! return a new one, never mutating what they were given. The aggregate
//! decides which of them to chain for each mutation path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::order_status::normalize_status_label;
use super::{StepStatus, StepTemplate, TimelineTemplate};

/// One step of an order timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    /// 1-based position in the lifecycle.
    pub id: u8,
    pub title: String,
    pub description: String,
    pub estimated_duration: String,
    pub start_date: Option<Timestamp>,
    pub finish_date: Option<Timestamp>,
    pub status: StepStatus,
}

impl TimelineStep {
    /// Creates a step from the template at `index` with the given status.
    pub fn from_template(index: usize, template: &StepTemplate, status: StepStatus) -> Self {
        Self {
            id: (index + 1) as u8,
            title: template.title.to_string(),
            description: template.description.to_string(),
            estimated_duration: template.estimated_duration.to_string(),
            start_date: None,
            finish_date: None,
            status,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }

    pub fn is_in_progress(&self) -> bool {
        self.status.is_in_progress()
    }

    pub fn is_locked(&self) -> bool {
        self.status.is_locked()
    }
}

/// Caller-supplied, possibly partial, step data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_duration: Option<String>,
    pub start_date: Option<Timestamp>,
    pub finish_date: Option<Timestamp>,
    pub status: Option<StepStatus>,
    pub is_completed: Option<bool>,
    pub is_in_progress: Option<bool>,
}

impl StepPatch {
    /// Status this patch asks for: explicit status, else the flags, else locked.
    pub fn resolved_status(&self) -> StepStatus {
        self.status.unwrap_or_else(|| {
            StepStatus::from_flags(
                self.is_completed.unwrap_or(false),
                self.is_in_progress.unwrap_or(false),
            )
        })
    }
}

fn non_empty_or(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Stateless timeline operations.
pub struct TimelineEngine;

impl TimelineEngine {
    /// Builds the seven template steps around a 0-based active index.
    ///
    /// Steps before `current_index` are completed, the step at it is in
    /// progress, the rest are locked. Indices past the last step clamp to it.
    pub fn build_default_timeline(current_index: usize) -> Vec<TimelineStep> {
        let active = current_index.min(TimelineTemplate::last_index());
        TimelineTemplate::all()
            .iter()
            .enumerate()
            .map(|(i, template)| {
                let status = match i.cmp(&active) {
                    std::cmp::Ordering::Less => StepStatus::Completed,
                    std::cmp::Ordering::Equal => StepStatus::InProgress,
                    std::cmp::Ordering::Greater => StepStatus::Locked,
                };
                TimelineStep::from_template(i, template, status)
            })
            .collect()
    }

    /// Guesses a 1-based starting cursor from a human status label.
    ///
    /// Used at creation when the caller gives a status but no timeline.
    pub fn resolve_initial_progress(status: Option<&str>) -> u8 {
        match status.map(normalize_status_label).as_deref() {
            Some("development") => 2,
            Some("inprogress") => 4,
            Some("production") => 5,
            Some("shipped") => 6,
            Some("delivered") => 7,
            _ => 1,
        }
    }

    /// Forces an arbitrary-length input into exactly seven steps.
    ///
    /// Present entries are merged onto the template (non-blank caller text
    /// wins). A missing entry is always locked, whatever later entries say.
    /// Entries past the seventh are dropped.
    pub fn normalize_provided_timeline(input: &[StepPatch]) -> Vec<TimelineStep> {
        TimelineTemplate::all()
            .iter()
            .enumerate()
            .map(|(i, template)| match input.get(i) {
                Some(patch) => TimelineStep {
                    id: (i + 1) as u8,
                    title: non_empty_or(&patch.title, template.title),
                    description: non_empty_or(&patch.description, template.description),
                    estimated_duration: non_empty_or(
                        &patch.estimated_duration,
                        template.estimated_duration,
                    ),
                    start_date: patch.start_date,
                    finish_date: patch.finish_date,
                    status: patch.resolved_status(),
                },
                None => TimelineStep::from_template(i, template, StepStatus::Locked),
            })
            .collect()
    }

    /// Re-sweeps a timeline around a 1-based cursor.
    ///
    /// Index `current - 1` becomes in progress, lower indices completed,
    /// higher indices locked. A cursor of 0 locks everything; a cursor past
    /// the end completes everything.
    pub fn enforce_single_active_step(timeline: &[TimelineStep], current: u8) -> Vec<TimelineStep> {
        let current = current as usize;
        timeline
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let position = i + 1;
                let status = match position.cmp(&current) {
                    std::cmp::Ordering::Less => StepStatus::Completed,
                    std::cmp::Ordering::Equal => StepStatus::InProgress,
                    std::cmp::Ordering::Greater => StepStatus::Locked,
                };
                TimelineStep {
                    status,
                    ..step.clone()
                }
            })
            .collect()
    }

    /// Derives the cursor from step flags, clamped to `[1, total]`.
    pub fn recompute_progress_from_flags(timeline: &[TimelineStep], total: u8) -> u8 {
        let completed = timeline.iter().filter(|s| s.is_completed()).count();
        let active = usize::from(timeline.iter().any(|s| s.is_in_progress()));
        let current = (completed + active).min(usize::from(u8::MAX)) as u8;
        current.clamp(1, total.max(1))
    }

    /// Title of the step at a 1-based cursor, falling back to the first
    /// template title when the cursor points outside the timeline.
    pub fn phase_title_at(timeline: &[TimelineStep], current: u8) -> String {
        (current as usize)
            .checked_sub(1)
            .and_then(|i| timeline.get(i))
            .map(|s| s.title.clone())
            .unwrap_or_else(|| TimelineTemplate::first_title().to_string())
    }

    /// 0-based index of the step whose title equals `title` (trimmed).
    pub fn position_of(timeline: &[TimelineStep], title: &str) -> Option<usize> {
        let title = title.trim();
        timeline.iter().position(|s| s.title == title)
    }

    /// Fills in missing dates implied by each step's status.
    ///
    /// Completed steps get a finish date (and a start date if they never had
    /// one); the active step gets a start date. Existing dates are kept.
    pub fn stamp_missing_dates(timeline: &mut [TimelineStep], now: Timestamp) {
        for step in timeline.iter_mut() {
            match step.status {
                StepStatus::Completed => {
                    step.start_date.get_or_insert(now);
                    step.finish_date.get_or_insert(now);
                }
                StepStatus::InProgress => {
                    step.start_date.get_or_insert(now);
                    step.finish_date = None;
                }
                StepStatus::Locked => {}
            }
        }
    }
}

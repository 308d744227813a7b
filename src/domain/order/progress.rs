//! Progress value object - the numeric cursor over an order's timeline.

use crate::domain::foundation::{Percentage, ValidationError};

use super::TimelineTemplate;

/// The `{current, total}` cursor of an order.
///
/// `current` is 1-based; `0 <= current <= total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    current: u8,
    total: u8,
}

impl Progress {
    /// Creates a progress cursor, validating both bounds.
    pub fn new(current: u8, total: u8) -> Result<Self, ValidationError> {
        let total = Self::validate_total(i64::from(total))?;
        if current > total {
            return Err(ValidationError::out_of_range(
                "progress.current",
                0,
                i64::from(total),
                i64::from(current),
            ));
        }
        Ok(Self { current, total })
    }

    /// Creates a cursor over the standard seven steps, clamping `current`
    /// into `[1, 7]`.
    pub fn standard(current: u8) -> Self {
        let total = TimelineTemplate::STANDARD_TOTAL;
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    /// Creates a cursor with `current` clamped into `[min, total]`.
    ///
    /// `total` must already be valid.
    pub(crate) fn clamped(current: i64, total: u8, min: u8) -> Self {
        let current = current.clamp(i64::from(min), i64::from(total)) as u8;
        Self { current, total }
    }

    /// Checks that a caller-declared total is within `[1, MAX_TOTAL]`.
    pub fn validate_total(total: i64) -> Result<u8, ValidationError> {
        let max = TimelineTemplate::MAX_TOTAL;
        if total < 1 || total > i64::from(max) {
            return Err(ValidationError::out_of_range(
                "progress.total",
                1,
                i64::from(max),
                total,
            ));
        }
        Ok(total as u8)
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn total(&self) -> u8 {
        self.total
    }

    /// Returns true when the cursor sits on the last step.
    pub fn is_final(&self) -> bool {
        self.current >= self.total
    }

    /// Returns true for the standard seven-step lifecycle.
    pub fn is_standard(&self) -> bool {
        self.total == TimelineTemplate::STANDARD_TOTAL
    }

    /// Completion as a truncated percentage.
    pub fn percentage(&self) -> Percentage {
        Percentage::of(u32::from(self.current), u32::from(self.total))
    }

    /// 0-based index of the active step, `None` when nothing is active.
    pub fn active_index(&self) -> Option<usize> {
        (self.current as usize).checked_sub(1)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::standard(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_of_seven() {
        let p = Progress::default();
        assert_eq!((p.current(), p.total()), (1, 7));
    }

    #[test]
    fn standard_clamps_into_range() {
        assert_eq!(Progress::standard(0).current(), 1);
        assert_eq!(Progress::standard(9).current(), 7);
    }

    #[test]
    fn new_rejects_current_above_total() {
        assert!(Progress::new(8, 7).is_err());
    }

    #[test]
    fn new_accepts_zero_current() {
        assert_eq!(Progress::new(0, 7).unwrap().current(), 0);
    }

    #[test]
    fn validate_total_bounds() {
        assert!(Progress::validate_total(0).is_err());
        assert!(Progress::validate_total(11).is_err());
        assert_eq!(Progress::validate_total(10).unwrap(), 10);
    }

    #[test]
    fn clamped_honours_minimum() {
        assert_eq!(Progress::clamped(-3, 7, 1).current(), 1);
        assert_eq!(Progress::clamped(-3, 7, 0).current(), 0);
        assert_eq!(Progress::clamped(42, 7, 1).current(), 7);
    }

    #[test]
    fn is_final_at_last_step() {
        assert!(Progress::standard(7).is_final());
        assert!(!Progress::standard(6).is_final());
    }

    #[test]
    fn percentage_of_four_of_seven() {
        assert_eq!(Progress::standard(4).percentage().value(), 57);
    }

    #[test]
    fn active_index_is_zero_based() {
        assert_eq!(Progress::standard(3).active_index(), Some(2));
        assert_eq!(Progress::new(0, 7).unwrap().active_index(), None);
    }
}

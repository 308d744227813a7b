//! ProgressStatusMapper - Derives the coarse order status from progress.

use crate::domain::foundation::Percentage;

use super::{OrderStatus, Progress};

/// Percentage thresholds, checked from the top down.
const PERCENT_THRESHOLDS: [(u8, OrderStatus); 4] = [
    (100, OrderStatus::Delivered),
    (85, OrderStatus::Shipped),
    (70, OrderStatus::Production),
    (30, OrderStatus::InProgress),
];

/// Stateless mapping from cursor/percentage to [`OrderStatus`].
pub struct ProgressStatusMapper;

impl ProgressStatusMapper {
    /// Exact lookup for the standard seven-step lifecycle.
    ///
    /// A cursor of 0 reads as `Development`; anything past 7 as `Delivered`.
    pub fn from_cursor(current: u8) -> OrderStatus {
        match current {
            0..=2 => OrderStatus::Development,
            3 | 4 => OrderStatus::InProgress,
            5 => OrderStatus::Production,
            6 => OrderStatus::Shipped,
            _ => OrderStatus::Delivered,
        }
    }

    /// Threshold mapping used when the total may not be seven.
    pub fn from_percentage(current: u8, total: u8) -> OrderStatus {
        let percent = Percentage::of(u32::from(current), u32::from(total));
        PERCENT_THRESHOLDS
            .iter()
            .find(|(threshold, _)| percent.value() >= *threshold)
            .map(|(_, status)| *status)
            .unwrap_or(OrderStatus::Development)
    }

    /// Picks the authoritative mapper for a cursor: the lookup table for
    /// standard orders, the percentage thresholds otherwise.
    pub fn for_progress(progress: &Progress) -> OrderStatus {
        if progress.is_standard() {
            Self::from_cursor(progress.current())
        } else {
            Self::from_percentage(progress.current(), progress.total())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cursor_table_matches_lifecycle() {
        let expected = [
            (1, OrderStatus::Development),
            (2, OrderStatus::Development),
            (3, OrderStatus::InProgress),
            (4, OrderStatus::InProgress),
            (5, OrderStatus::Production),
            (6, OrderStatus::Shipped),
            (7, OrderStatus::Delivered),
        ];
        for (cursor, status) in expected {
            assert_eq!(ProgressStatusMapper::from_cursor(cursor), status, "cursor {}", cursor);
        }
    }

    #[test]
    fn cursor_out_of_table_is_clamped() {
        assert_eq!(ProgressStatusMapper::from_cursor(0), OrderStatus::Development);
        assert_eq!(ProgressStatusMapper::from_cursor(9), OrderStatus::Delivered);
    }

    #[test]
    fn percentage_thresholds() {
        assert_eq!(ProgressStatusMapper::from_percentage(10, 10), OrderStatus::Delivered);
        assert_eq!(ProgressStatusMapper::from_percentage(9, 10), OrderStatus::Shipped);
        assert_eq!(ProgressStatusMapper::from_percentage(7, 10), OrderStatus::Production);
        assert_eq!(ProgressStatusMapper::from_percentage(3, 10), OrderStatus::InProgress);
        assert_eq!(ProgressStatusMapper::from_percentage(2, 10), OrderStatus::Development);
    }

    #[test]
    fn percentage_with_zero_total_is_development() {
        assert_eq!(ProgressStatusMapper::from_percentage(0, 0), OrderStatus::Development);
    }

    #[test]
    fn four_of_seven_is_in_progress() {
        assert_eq!(ProgressStatusMapper::from_percentage(4, 7), OrderStatus::InProgress);
    }

    #[test]
    fn for_progress_uses_percentage_for_non_standard_total() {
        let progress = Progress::new(8, 10).unwrap();
        assert_eq!(ProgressStatusMapper::for_progress(&progress), OrderStatus::Production);
    }

    proptest! {
        #[test]
        fn mappers_agree_on_standard_lifecycle(current in 1u8..=7) {
            prop_assert_eq!(
                ProgressStatusMapper::from_cursor(current),
                ProgressStatusMapper::from_percentage(current, 7)
            );
        }

        #[test]
        fn percentage_mapper_is_monotonic(total in 1u8..=10, a in 0u8..=10, b in 0u8..=10) {
            let (lo, hi) = if a <= b { (a.min(total), b.min(total)) } else { (b.min(total), a.min(total)) };
            let rank = |s: OrderStatus| s as u8;
            prop_assert!(
                rank(ProgressStatusMapper::from_percentage(lo, total))
                    <= rank(ProgressStatusMapper::from_percentage(hi, total))
            );
        }
    }
}

//! TimelineTemplate - The canonical seven-step order lifecycle.
//!
//! Every order timeline is built from, padded with, and validated against
//! this single definition.
//!
//! # Step Order
//!
//! 1. Offer Accepted → 2. Product Development → 3. Sampling →
//! 4. Sample Approval → 5. Production Phase → 6. Shipping & Transport →
//! 7. Delivered

/// Static definition of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub estimated_duration: &'static str,
}

/// Central location for the lifecycle step definitions.
pub struct TimelineTemplate;

impl TimelineTemplate {
    /// Number of steps in the standard lifecycle.
    pub const STANDARD_TOTAL: u8 = 7;

    /// Largest progress total an update may declare.
    pub const MAX_TOTAL: u8 = 10;

    /// The canonical steps, in order.
    pub const STEPS: [StepTemplate; 7] = [
        StepTemplate {
            title: "Offer Accepted",
            description: "Customer accepted the offer and the order was confirmed",
            estimated_duration: "1-2 days",
        },
        StepTemplate {
            title: "Product Development",
            description: "Specifications, materials and tooling are finalised",
            estimated_duration: "1-2 weeks",
        },
        StepTemplate {
            title: "Sampling",
            description: "Pre-production samples are manufactured",
            estimated_duration: "1-2 weeks",
        },
        StepTemplate {
            title: "Sample Approval",
            description: "Customer reviews and signs off the samples",
            estimated_duration: "3-5 days",
        },
        StepTemplate {
            title: "Production Phase",
            description: "Bulk production and quality control",
            estimated_duration: "3-6 weeks",
        },
        StepTemplate {
            title: "Shipping & Transport",
            description: "Goods are packed, cleared and in transit",
            estimated_duration: "2-4 weeks",
        },
        StepTemplate {
            title: "Delivered",
            description: "Goods received by the customer",
            estimated_duration: "1 day",
        },
    ];

    /// Returns all step templates in order.
    pub fn all() -> &'static [StepTemplate; 7] {
        &Self::STEPS
    }

    /// Returns the template at a 0-based index.
    pub fn get(index: usize) -> Option<&'static StepTemplate> {
        Self::STEPS.get(index)
    }

    /// Returns the title of the first step.
    pub fn first_title() -> &'static str {
        Self::STEPS[0].title
    }

    /// Index of the last step.
    pub fn last_index() -> usize {
        Self::STEPS.len() - 1
    }

    /// Returns the canonical titles in order.
    pub fn titles() -> Vec<&'static str> {
        Self::STEPS.iter().map(|s| s.title).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_seven_steps() {
        assert_eq!(TimelineTemplate::all().len(), 7);
        assert_eq!(
            TimelineTemplate::all().len(),
            TimelineTemplate::STANDARD_TOTAL as usize
        );
    }

    #[test]
    fn first_step_is_offer_accepted() {
        assert_eq!(TimelineTemplate::first_title(), "Offer Accepted");
    }

    #[test]
    fn fifth_step_is_production_phase() {
        assert_eq!(TimelineTemplate::get(4).unwrap().title, "Production Phase");
    }

    #[test]
    fn get_out_of_range_is_none() {
        assert!(TimelineTemplate::get(7).is_none());
    }

    #[test]
    fn titles_are_unique() {
        let mut titles = TimelineTemplate::titles();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), 7);
    }

    #[test]
    fn every_step_has_text() {
        for step in TimelineTemplate::all() {
            assert!(!step.title.is_empty());
            assert!(!step.description.is_empty());
            assert!(!step.estimated_duration.is_empty());
        }
    }
}

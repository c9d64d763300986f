// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeSet;
use workout_finder_model::{CalendarZone, Category, Workout, YearMonth};

/// Conjunction of the optional month and category criteria.
///
/// Categories form a set: duplicates collapse and order is irrelevant. An
/// empty set places no constraint on category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutFilter {
    pub start_month: Option<YearMonth>,
    pub categories: BTreeSet<Category>,
}

impl WorkoutFilter {
    #[must_use]
    pub fn new(
        start_month: Option<YearMonth>,
        categories: impl IntoIterator<Item = Category>,
    ) -> Self {
        Self {
            start_month,
            categories: categories.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_month.is_none() && self.categories.is_empty()
    }

    /// A record whose start date cannot be read never matches a month
    /// criterion.
    #[must_use]
    pub fn matches(&self, workout: &Workout, zone: &CalendarZone) -> bool {
        if let Some(month) = self.start_month {
            if zone.year_month_of(&workout.start_date) != Some(month) {
                return false;
            }
        }
        self.categories.is_empty() || self.categories.contains(&workout.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_finder_model::WorkoutId;

    fn workout(start: &str, category: &str) -> Workout {
        Workout::new(
            WorkoutId::parse("w").expect("id"),
            "n",
            "d",
            start,
            Category::parse(category).expect("category"),
        )
    }

    fn may() -> Option<YearMonth> {
        Some(YearMonth::new(2025, 5).expect("month"))
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = WorkoutFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&workout("garbage", "c9"), &CalendarZone::utc()));
    }

    #[test]
    fn month_and_category_are_conjunctive() {
        let zone = CalendarZone::utc();
        let c1 = Category::parse("c1").expect("c1");
        let c3 = Category::parse("c3").expect("c3");
        let filter = WorkoutFilter::new(may(), [c1, c3]);

        assert!(filter.matches(&workout("2025-05-14T08:00:00.000Z", "c1"), &zone));
        assert!(filter.matches(&workout("2025-05-31T23:59:59.000Z", "c3"), &zone));
        assert!(!filter.matches(&workout("2025-05-14T08:00:00.000Z", "c2"), &zone));
        assert!(!filter.matches(&workout("2025-06-01T00:00:00.000Z", "c1"), &zone));
        assert!(!filter.matches(&workout("not a date", "c1"), &zone));
    }

    #[test]
    fn month_boundary_follows_calendar_zone() {
        let filter = WorkoutFilter::new(may(), []);
        let record = workout("2025-05-31T23:30:00.000Z", "c1");
        let east = CalendarZone::parse("+02:00").expect("zone");
        assert!(filter.matches(&record, &CalendarZone::utc()));
        assert!(!filter.matches(&record, &east));
    }

    #[test]
    fn duplicate_categories_collapse() {
        let c1 = Category::parse("c1").expect("c1");
        let filter = WorkoutFilter::new(None, [c1.clone(), c1]);
        assert_eq!(filter.categories.len(), 1);
    }
}

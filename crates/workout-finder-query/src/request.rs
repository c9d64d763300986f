// SPDX-License-Identifier: Apache-2.0

use crate::filters::WorkoutFilter;
use serde::Serialize;
use workout_finder_model::{Workout, WorkoutId};

/// One catalog request. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutQuery {
    pub page: usize,
    pub filter: WorkoutFilter,
    pub id: Option<WorkoutId>,
}

impl Default for WorkoutQuery {
    fn default() -> Self {
        Self {
            page: 1,
            filter: WorkoutFilter::default(),
            id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    PointLookup,
    FilteredPage,
    UnfilteredPage,
}

impl QueryMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PointLookup => "point_lookup",
            Self::FilteredPage => "filtered_page",
            Self::UnfilteredPage => "unfiltered_page",
        }
    }
}

impl WorkoutQuery {
    #[must_use]
    pub fn page(page: usize) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn by_id(id: WorkoutId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn filtered(page: usize, filter: WorkoutFilter) -> Self {
        Self {
            page,
            filter,
            id: None,
        }
    }

    /// An id wins over every other parameter; otherwise any active filter
    /// forces a full scan.
    #[must_use]
    pub fn mode(&self) -> QueryMode {
        if self.id.is_some() {
            QueryMode::PointLookup
        } else if self.filter.is_empty() {
            QueryMode::UnfilteredPage
        } else {
            QueryMode::FilteredPage
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPage {
    pub workouts: Vec<Workout>,
    pub total_pages: usize,
    pub total_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Found(Workout),
    NotFound,
    Page(WorkoutPage),
}

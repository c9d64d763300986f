// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use workout_finder_model::Workout;
use workout_finder_query::WorkoutPage;

/// Body of a successful point lookup: `{"workout": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkoutResponseDto {
    pub workout: Workout,
}

/// Body of a page response. Field names are the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct WorkoutPageResponseDto {
    pub workouts: Vec<Workout>,
    pub total_pages: usize,
    pub total_items: usize,
}

impl From<WorkoutPage> for WorkoutPageResponseDto {
    fn from(page: WorkoutPage) -> Self {
        Self {
            workouts: page.workouts,
            total_pages: page.total_pages,
            total_items: page.total_items,
        }
    }
}

// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Workout catalog data model.

mod layout;
mod month;
mod saved_filters;
mod workout;

use std::fmt::{Display, Formatter};

pub use layout::{
    shard_file_name, DatasetLayout, DEFAULT_PAGE_SIZE, DEFAULT_SHARD_FILE_PREFIX,
    DEFAULT_TOTAL_SHARDS,
};
pub use month::{CalendarZone, YearMonth};
pub use saved_filters::{SavedFilters, SAVED_FILTERS_KEY};
pub use workout::{Category, Workout, WorkoutId, CATEGORY_MAX_LEN, ID_MAX_LEN};

pub const CRATE_NAME: &str = "workout-finder-model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Key the browser UI stored its filter blob under.
pub const SAVED_FILTERS_KEY: &str = "workout_finder_filters";

/// Last filter state of a client, persisted between sessions.
///
/// This is presentation state: the query engine never reads it. Missing
/// fields fall back to the initial UI state (page 1, no filters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilters {
    #[serde(default = "first_page")]
    pub current_page: usize,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

fn first_page() -> usize {
    1
}

impl Default for SavedFilters {
    fn default() -> Self {
        Self {
            current_page: first_page(),
            start_date: String::new(),
            categories: Vec::new(),
        }
    }
}

impl SavedFilters {
    /// Stored page, or 1 when the stored value is zero.
    #[must_use]
    pub fn page(&self) -> usize {
        self.current_page.max(1)
    }

    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.start_date.trim().is_empty() || self.categories.iter().any(|c| !c.trim().is_empty())
    }
}

// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const ID_MAX_LEN: usize = 128;
pub const CATEGORY_MAX_LEN: usize = 64;

/// Opaque record identifier, stable for the life of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("workout id must not be empty".to_string()));
        }
        if s.len() > ID_MAX_LEN {
            return Err(ValidationError(format!(
                "workout id exceeds max length {ID_MAX_LEN}"
            )));
        }
        if s.chars().any(char::is_control) {
            return Err(ValidationError(
                "workout id must not contain control characters".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    /// Lookup key taken verbatim: no trimming, length, or character checks.
    /// Point lookups compare it byte-for-byte against stored ids, so an
    /// id no record carries simply misses.
    #[must_use]
    pub fn exact(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WorkoutId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category label. The taxonomy (`c1`..`c7` in the reference dataset) is
/// external configuration, so any non-empty label is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("category must not be empty".to_string()));
        }
        if s.len() > CATEGORY_MAX_LEN {
            return Err(ValidationError(format!(
                "category exceeds max length {CATEGORY_MAX_LEN}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One catalog entry. `start_date` keeps the stored ISO-8601 text verbatim so
/// responses reproduce the dataset byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: WorkoutId,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub category: Category,
}

impl Workout {
    #[must_use]
    pub fn new(
        id: WorkoutId,
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            start_date: start_date.into(),
            category,
        }
    }
}

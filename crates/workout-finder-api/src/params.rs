// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use workout_finder_model::{Category, WorkoutId, YearMonth};
use workout_finder_query::{WorkoutFilter, WorkoutQuery};

/// Parsed `GET /api/workouts` query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWorkoutsParams {
    pub id: Option<WorkoutId>,
    pub page: usize,
    pub start_month: Option<YearMonth>,
    /// Distinct categories in first-seen order.
    pub categories: Vec<Category>,
    pub pretty: bool,
}

impl ListWorkoutsParams {
    #[must_use]
    pub fn into_query(self) -> WorkoutQuery {
        WorkoutQuery {
            page: self.page,
            filter: WorkoutFilter::new(self.start_month, self.categories),
            id: self.id,
        }
    }
}

/// Parses raw query pairs in request order.
///
/// `id`, `page`, and `startDate` use their first occurrence; `category` is
/// repeatable. Empty values are treated as absent. `id` is kept verbatim
/// and matched exactly; when present the remaining parameters are not
/// validated, since a point lookup ignores them.
pub fn parse_list_workouts_params(
    query: &[(String, String)],
) -> Result<ListWorkoutsParams, ApiError> {
    let pretty = first(query, "pretty").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    if let Some(raw) = first_verbatim(query, "id") {
        return Ok(ListWorkoutsParams {
            id: Some(WorkoutId::exact(raw)),
            page: 1,
            start_month: None,
            categories: Vec::new(),
            pretty,
        });
    }

    let page = match first(query, "page") {
        None => 1,
        Some(raw) => {
            let value = raw
                .parse::<usize>()
                .map_err(|_| ApiError::invalid_param("page", raw))?;
            if value == 0 {
                return Err(ApiError::page_out_of_range(raw, "pages start at 1"));
            }
            value
        }
    };

    let start_month = first(query, "startDate")
        .map(|raw| YearMonth::parse(raw).map_err(|_| ApiError::invalid_param("startDate", raw)))
        .transpose()?;

    let mut categories: Vec<Category> = Vec::new();
    for raw in all(query, "category") {
        let category =
            Category::parse(raw).map_err(|_| ApiError::invalid_param("category", raw))?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    Ok(ListWorkoutsParams {
        id: None,
        page,
        start_month,
        categories,
        pretty,
    })
}

fn all<'a>(query: &'a [(String, String)], name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    query
        .iter()
        .filter(move |(key, _)| key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// First non-empty value of `name`, untrimmed.
fn first_verbatim<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
}

fn first<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

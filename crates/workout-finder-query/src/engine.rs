// SPDX-License-Identifier: Apache-2.0

use crate::filters::WorkoutFilter;
use crate::limits::QueryLimits;
use crate::query_error::QueryError;
use crate::request::{QueryMode, QueryOutcome, WorkoutPage, WorkoutQuery};
use crate::scan::scan_all;
use std::sync::Arc;
use tracing::debug;
use workout_finder_model::{CalendarZone, DatasetLayout, Workout, WorkoutId};
use workout_finder_store::{ShardReadDiagnostics, ShardReader};

/// Answers catalog queries against one immutable sharded dataset.
///
/// Shard failures never surface here: the reader logs them and supplies an
/// empty shard, so totals under-count instead of the request failing.
#[derive(Clone)]
pub struct QueryEngine {
    reader: ShardReader,
    zone: CalendarZone,
    limits: QueryLimits,
}

impl QueryEngine {
    #[must_use]
    pub fn new(reader: ShardReader, zone: CalendarZone, limits: QueryLimits) -> Self {
        Self {
            reader,
            zone,
            limits,
        }
    }

    #[must_use]
    pub fn layout(&self) -> DatasetLayout {
        self.reader.layout()
    }

    #[must_use]
    pub fn zone(&self) -> CalendarZone {
        self.zone
    }

    #[must_use]
    pub fn limits(&self) -> &QueryLimits {
        &self.limits
    }

    #[must_use]
    pub fn reader(&self) -> &ShardReader {
        &self.reader
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Arc<ShardReadDiagnostics> {
        self.reader.diagnostics()
    }

    /// Dispatches on [`WorkoutQuery::mode`].
    pub async fn execute(&self, query: &WorkoutQuery) -> Result<QueryOutcome, QueryError> {
        match (query.mode(), &query.id) {
            (QueryMode::PointLookup, Some(id)) => Ok(match self.find_by_id(id).await {
                Some(workout) => QueryOutcome::Found(workout),
                None => QueryOutcome::NotFound,
            }),
            (QueryMode::FilteredPage, _) => self
                .get_filtered_page(query.page, &query.filter)
                .await
                .map(QueryOutcome::Page),
            _ => self.get_page(query.page).await.map(QueryOutcome::Page),
        }
    }

    /// First record with a matching id, scanning shards in order and stopping
    /// at the first hit.
    pub async fn find_by_id(&self, id: &WorkoutId) -> Option<Workout> {
        for index in self.layout().shard_indices() {
            let found = self
                .reader
                .read_shard(index)
                .await
                .into_iter()
                .find(|w| &w.id == id);
            if found.is_some() {
                debug!(id = %id, shard = index, "workout found");
                return found;
            }
        }
        None
    }

    /// Reads the one shard backing `page`. Totals are the layout's nominal
    /// figures and do not depend on what the shard actually holds.
    pub async fn get_page(&self, page: usize) -> Result<WorkoutPage, QueryError> {
        let layout = self.layout();
        if !layout.contains_shard(page) {
            return Err(QueryError::invalid_parameter(
                "page",
                format!(
                    "Invalid page number: {page} is outside 1..={}",
                    layout.total_shards()
                ),
            ));
        }
        let workouts = self.reader.read_shard(page).await;
        Ok(WorkoutPage {
            workouts,
            total_pages: layout.total_shards(),
            total_items: layout.total_records(),
        })
    }

    /// Scans the whole dataset, keeps matches in dataset order, and slices
    /// out `page`. A page past the end is empty but carries the real totals.
    pub async fn get_filtered_page(
        &self,
        page: usize,
        filter: &WorkoutFilter,
    ) -> Result<WorkoutPage, QueryError> {
        if page == 0 {
            return Err(QueryError::invalid_parameter(
                "page",
                "Invalid page number: pages start at 1",
            ));
        }
        if filter.categories.len() > self.limits.max_categories {
            return Err(QueryError::invalid_parameter(
                "category",
                format!(
                    "too many categories: {} exceeds limit {}",
                    filter.categories.len(),
                    self.limits.max_categories
                ),
            ));
        }
        let layout = self.layout();
        let matched: Vec<Workout> =
            scan_all(&self.reader, self.limits.max_concurrent_shard_reads)
                .await?
                .into_iter()
                .filter(|w| filter.matches(w, &self.zone))
                .collect();

        let total_items = matched.len();
        let window = layout.page_window(page);
        let start = window.start.min(total_items);
        let end = window.end.min(total_items);
        debug!(page, total_items, start, end, "filtered page assembled");
        Ok(WorkoutPage {
            workouts: matched[start..end].to_vec(),
            total_pages: layout.total_pages_for(total_items),
            total_items,
        })
    }
}

// SPDX-License-Identifier: Apache-2.0

use crate::config::ApiConfig;
use crate::metrics::ServerMetrics;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::sync::Arc;
use workout_finder_query::QueryEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: QueryEngine,
    pub api: ApiConfig,
    pub ready: Arc<AtomicBool>,
    pub accepting_requests: Arc<AtomicBool>,
    pub metrics: Arc<ServerMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(engine: QueryEngine) -> Self {
        Self::with_config(engine, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(engine: QueryEngine, api: ApiConfig) -> Self {
        Self {
            engine,
            api,
            ready: Arc::new(AtomicBool::new(true)),
            accepting_requests: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(ServerMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

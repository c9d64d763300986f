// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_uri_bytes: usize,
    pub request_timeout: Duration,
    /// `max-age` advertised on catalog responses. The dataset is immutable
    /// while the process runs.
    pub response_cache_ttl: Duration,
    pub slow_query_threshold: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_uri_bytes: 8192,
            request_timeout: Duration::from_secs(5),
            response_cache_ttl: Duration::from_secs(30),
            slow_query_threshold: Duration::from_millis(200),
        }
    }
}

// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use workout_finder_store::ShardReadDiagnostics;

/// Process-local counters rendered in Prometheus text format.
#[derive(Debug, Default)]
pub struct ServerMetrics {
    requests: Mutex<BTreeMap<(String, u16), u64>>,
    scan_queries: AtomicU64,
    slow_queries: AtomicU64,
    timeouts: AtomicU64,
}

impl ServerMetrics {
    pub fn observe_request(&self, route: &str, status: u16) {
        if let Ok(mut requests) = self.requests.lock() {
            *requests.entry((route.to_string(), status)).or_insert(0) += 1;
        }
    }

    pub fn observe_scan(&self) {
        self.scan_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_slow_query(&self) {
        self.slow_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn request_count(&self, route: &str, status: u16) -> u64 {
        self.requests
            .lock()
            .ok()
            .and_then(|r| r.get(&(route.to_string(), status)).copied())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn render(&self, shards: &ShardReadDiagnostics) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# TYPE workout_finder_requests_total counter");
        if let Ok(requests) = self.requests.lock() {
            for ((route, status), count) in requests.iter() {
                let _ = writeln!(
                    out,
                    "workout_finder_requests_total{{route=\"{route}\",status=\"{status}\"}} {count}"
                );
            }
        }
        let counters = [
            ("workout_finder_shard_reads_total", shards.reads()),
            ("workout_finder_shard_read_failures_total", shards.failures()),
            (
                "workout_finder_scan_queries_total",
                self.scan_queries.load(Ordering::Relaxed),
            ),
            (
                "workout_finder_slow_queries_total",
                self.slow_queries.load(Ordering::Relaxed),
            ),
            (
                "workout_finder_request_timeouts_total",
                self.timeouts.load(Ordering::Relaxed),
            ),
        ];
        for (name, value) in counters {
            let _ = writeln!(out, "# TYPE {name} counter");
            let _ = writeln!(out, "{name} {value}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_requests_by_route_and_status() {
        let metrics = ServerMetrics::default();
        metrics.observe_request("/api/workouts", 200);
        metrics.observe_request("/api/workouts", 200);
        metrics.observe_request("/api/workouts", 404);
        metrics.observe_scan();

        let text = metrics.render(&ShardReadDiagnostics::default());
        assert!(text.contains(
            "workout_finder_requests_total{route=\"/api/workouts\",status=\"200\"} 2"
        ));
        assert!(text.contains(
            "workout_finder_requests_total{route=\"/api/workouts\",status=\"404\"} 1"
        ));
        assert!(text.contains("workout_finder_scan_queries_total 1"));
        assert!(text.contains("workout_finder_shard_read_failures_total 0"));
        assert_eq!(metrics.request_count("/api/workouts", 200), 2);
    }
}

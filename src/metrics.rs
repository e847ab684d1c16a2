//! Prometheus-compatible metrics endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::http::cache::CacheStats;
use crate::state::AppState;

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Server start time
    start_time: Instant,
    /// Total requests processed
    request_count: RwLock<u64>,
    /// Requests by endpoint
    requests_by_endpoint: RwLock<HashMap<String, u64>>,
    /// Conversions actually run (cache misses)
    conversions: RwLock<u64>,
    /// Subtitle entries emitted by those conversions
    entries_emitted: RwLock<u64>,
    /// Bytes of SRT text served
    bytes_served: RwLock<u64>,
    /// Errors by type
    errors_by_type: RwLock<HashMap<String, u64>>,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            request_count: RwLock::new(0),
            requests_by_endpoint: RwLock::new(HashMap::new()),
            conversions: RwLock::new(0),
            entries_emitted: RwLock::new(0),
            bytes_served: RwLock::new(0),
            errors_by_type: RwLock::new(HashMap::new()),
        }
    }

    /// Record a request
    pub fn record_request(&self, endpoint: &str) {
        *self.request_count.write() += 1;
        *self
            .requests_by_endpoint
            .write()
            .entry(endpoint.to_string())
            .or_insert(0) += 1;
    }

    /// Record a conversion and the entries it produced
    pub fn record_conversion(&self, entries: usize) {
        *self.conversions.write() += 1;
        *self.entries_emitted.write() += entries as u64;
    }

    /// Record bytes served
    pub fn record_bytes(&self, bytes: u64) {
        *self.bytes_served.write() += bytes;
    }

    /// Record error
    pub fn record_error(&self, error_type: &str) {
        *self
            .errors_by_type
            .write()
            .entry(error_type.to_string())
            .or_insert(0) += 1;
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics in Prometheus format
    pub fn export_prometheus(&self, cache: &CacheStats) -> String {
        let mut output = String::new();

        // Server info
        output.push_str("# HELP srt_server_uptime_seconds Server uptime in seconds\n");
        output.push_str("# TYPE srt_server_uptime_seconds counter\n");
        output.push_str(&format!(
            "srt_server_uptime_seconds {}\n",
            self.uptime_secs()
        ));

        output.push_str(
            "\n# HELP srt_server_start_time_seconds Server start time as Unix timestamp\n",
        );
        output.push_str("# TYPE srt_server_start_time_seconds gauge\n");
        output.push_str(&format!(
            "srt_server_start_time_seconds {}\n",
            std::time::SystemTime::UNIX_EPOCH
                .elapsed()
                .unwrap_or(Duration::ZERO)
                .as_secs()
                .saturating_sub(self.uptime_secs())
        ));

        // Request metrics
        output.push_str("\n# HELP srt_requests_total Total number of HTTP requests\n");
        output.push_str("# TYPE srt_requests_total counter\n");
        output.push_str(&format!(
            "srt_requests_total {}\n",
            *self.request_count.read()
        ));

        output.push_str("\n# HELP srt_requests_by_endpoint Requests by endpoint\n");
        output.push_str("# TYPE srt_requests_by_endpoint counter\n");
        for (endpoint, count) in self.requests_by_endpoint.read().iter() {
            output.push_str(&format!(
                "srt_requests_by_endpoint{{endpoint=\"{}\"}} {}\n",
                endpoint, count
            ));
        }

        // Conversion metrics
        output.push_str("\n# HELP srt_conversions_total Conversions run by the converter\n");
        output.push_str("# TYPE srt_conversions_total counter\n");
        output.push_str(&format!(
            "srt_conversions_total {}\n",
            *self.conversions.read()
        ));

        output.push_str("\n# HELP srt_entries_emitted_total Subtitle entries produced\n");
        output.push_str("# TYPE srt_entries_emitted_total counter\n");
        output.push_str(&format!(
            "srt_entries_emitted_total {}\n",
            *self.entries_emitted.read()
        ));

        output.push_str("\n# HELP srt_bytes_served_total Total SRT bytes served\n");
        output.push_str("# TYPE srt_bytes_served_total counter\n");
        output.push_str(&format!(
            "srt_bytes_served_total {}\n",
            *self.bytes_served.read()
        ));

        // Cache metrics
        output.push_str("\n# HELP srt_cache_hits_total Total cache hits\n");
        output.push_str("# TYPE srt_cache_hits_total counter\n");
        output.push_str(&format!("srt_cache_hits_total {}\n", cache.hits));

        output.push_str("\n# HELP srt_cache_misses_total Total cache misses\n");
        output.push_str("# TYPE srt_cache_misses_total counter\n");
        output.push_str(&format!("srt_cache_misses_total {}\n", cache.misses));

        let hit_ratio = if cache.hits + cache.misses > 0 {
            cache.hits as f64 / (cache.hits + cache.misses) as f64
        } else {
            0.0
        };
        output.push_str("\n# HELP srt_cache_hit_ratio Cache hit ratio\n");
        output.push_str("# TYPE srt_cache_hit_ratio gauge\n");
        output.push_str(&format!("srt_cache_hit_ratio {:.4}\n", hit_ratio));

        output.push_str("\n# HELP srt_cache_entries Cached conversions\n");
        output.push_str("# TYPE srt_cache_entries gauge\n");
        output.push_str(&format!("srt_cache_entries {}\n", cache.entry_count));

        // Error metrics
        output.push_str("\n# HELP srt_errors_total Total errors by type\n");
        output.push_str("# TYPE srt_errors_total counter\n");
        for (error_type, count) in self.errors_by_type.read().iter() {
            output.push_str(&format!(
                "srt_errors_total{{type=\"{}\"}} {}\n",
                error_type, count
            ));
        }

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics endpoint handler
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let prometheus_output = state
        .metrics
        .export_prometheus(&state.conversion_cache.stats());

    (
        StatusCode::OK,
        [("Content-Type", "text/plain; version=0.0.4")],
        prometheus_output,
    )
        .into_response()
}

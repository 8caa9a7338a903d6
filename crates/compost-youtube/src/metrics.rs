//! Data API request metrics.
//!
//! Recorded through the `metrics` facade; binaries decide whether an
//! exporter is installed.

use metrics::{counter, histogram};

/// Metric name constants.
pub mod names {
    /// Total API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "youtube_requests_total";

    /// Request latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "youtube_latency_seconds";

    /// Comments collected by the fetcher.
    pub const COMMENTS_FETCHED_TOTAL: &str = "youtube_comments_fetched_total";
}

/// Record metrics for a completed API request.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record the number of comments a fetch returned.
pub fn record_comments_fetched(count: usize) {
    counter!(names::COMMENTS_FETCHED_TOTAL).increment(count as u64);
}

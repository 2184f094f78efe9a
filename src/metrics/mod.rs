//! Basic metrics instrumentation for tracking proxy behavior.
//!
//! Provides counters for upstream HTTP traffic and cache effectiveness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the proxy.
///
/// Clones share the same underlying counters.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of upstream HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of upstream HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all upstream requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Requests answered from a fresh cache entry
    cache_hits_total: Arc<AtomicU64>,

    /// Requests that had to go upstream
    cache_misses_total: Arc<AtomicU64>,

    /// Requests answered from an expired entry after an upstream failure
    stale_fallbacks_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            cache_hits_total: Arc::new(AtomicU64::new(0)),
            cache_misses_total: Arc::new(AtomicU64::new(0)),
            stale_fallbacks_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an upstream HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an upstream HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request served from a fresh cache entry.
    pub fn record_cache_hit(&self) {
        self.cache_hits_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request that went upstream.
    pub fn record_cache_miss(&self) {
        self.cache_misses_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request served from a stale entry after upstream failure.
    pub fn record_stale_fallback(&self) {
        self.stale_fallbacks_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total upstream HTTP requests.
    pub fn http_requests(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total upstream HTTP errors.
    pub fn http_errors(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total upstream request duration in milliseconds.
    pub fn http_duration_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get total cache hits.
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits_total.load(Ordering::Relaxed)
    }

    /// Get total cache misses.
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses_total.load(Ordering::Relaxed)
    }

    /// Get total stale fallbacks.
    pub fn stale_fallbacks(&self) -> u64 {
        self.stale_fallbacks_total.load(Ordering::Relaxed)
    }
}

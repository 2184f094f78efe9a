//! HTTP client for the upstream exchange-rate endpoints.
//!
//! This module provides a synchronous HTTP client that is used from async
//! contexts via `tokio::task::spawn_blocking` (see [`async_wrapper`]). The
//! client makes a single attempt per fetch with a bounded timeout and maps
//! every failure mode to [`UpstreamError`].

mod async_wrapper;
pub use async_wrapper::{UpstreamFetcher, UreqUpstreamFetcher};

use crate::config::Config;
use crate::error::{UpstreamError, UpstreamResult};
use crate::metrics::Metrics;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Synchronous client for upstream GETs.
///
/// Appends a `_t=<epoch-millis>` query parameter to every request so that
/// intermediary HTTP caches never serve us their own stale copy.
#[derive(Clone)]
pub struct UpstreamClient {
    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl UpstreamClient {
    /// Create a new UpstreamClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create an UpstreamClient with an explicit timeout (useful for testing).
    #[doc(hidden)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Fetch a JSON payload from `base_url` in a single attempt.
    pub fn fetch_json(&self, base_url: &str) -> UpstreamResult<Value> {
        let start = Instant::now();
        let url = with_cache_buster(base_url, epoch_millis());

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .call()
            .map_err(map_error)
            .and_then(|response| {
                response
                    .into_json::<Value>()
                    .map_err(|e| UpstreamError::MalformedBody(e.to_string()))
            });

        let duration = start.elapsed();
        if result.is_err() {
            self.metrics.record_http_error();
        }
        self.metrics.record_http_request(duration);

        result
    }
}

/// Current wall-clock time as epoch milliseconds.
fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Append the cache-busting `_t` parameter to a URL.
fn with_cache_buster(base_url: &str, timestamp: u128) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}_t={}", base_url, separator, timestamp)
}

/// Map a ureq error to an UpstreamError.
fn map_error(error: ureq::Error) -> UpstreamError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            UpstreamError::Status {
                status: code,
                message,
            }
        }
        ureq::Error::Transport(transport) => UpstreamError::Transport(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_buster_plain_url() {
        let url = with_cache_buster("https://lirat.org/wp-json/alba-cur/cur/1.json", 1700000000000);
        assert_eq!(
            url,
            "https://lirat.org/wp-json/alba-cur/cur/1.json?_t=1700000000000"
        );
    }

    #[test]
    fn test_cache_buster_url_with_query() {
        let url = with_cache_buster("http://localhost:9000/rates?city=damascus", 42);
        assert_eq!(url, "http://localhost:9000/rates?city=damascus&_t=42");
    }

    #[test]
    fn test_epoch_millis_monotonic_enough() {
        let a = epoch_millis();
        let b = epoch_millis();
        assert!(b >= a);
        // Sanity: after 2020
        assert!(a > 1_577_836_800_000);
    }
}

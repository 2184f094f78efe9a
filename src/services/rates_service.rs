//! Fetch-or-serve orchestration.
//!
//! For every data request the service decides between three outcomes:
//! serve the fresh cached payload, fetch upstream and cache the result,
//! or fall back to a stale cached payload when the fetch fails. An
//! upstream error is never surfaced raw; it only reaches the caller as
//! [`ProxyError::FetchFailed`] when no cached entry exists at all.

use crate::cache::RateCache;
use crate::category::{Category, City};
use crate::client::UpstreamFetcher;
use crate::config::Config;
use crate::error::{ProxyError, ProxyResult};
use crate::metrics::Metrics;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Orchestrator for cached upstream data.
///
/// Constructed once at startup and shared by every connection task.
pub struct RatesService {
    upstream: Arc<dyn UpstreamFetcher>,
    cache: RateCache,
    config: Arc<Config>,
    metrics: Metrics,
}

impl RatesService {
    /// Create a new service over an upstream fetcher and a cache.
    pub fn new(
        upstream: Arc<dyn UpstreamFetcher>,
        cache: RateCache,
        config: Arc<Config>,
        metrics: Metrics,
    ) -> Self {
        Self {
            upstream,
            cache,
            config,
            metrics,
        }
    }

    /// Latest exchange rates, cached or fresh.
    pub async fn latest_rates(&self, force_refresh: bool) -> ProxyResult<Value> {
        self.fetch_or_serve(Category::LatestRates, force_refresh)
            .await
    }

    /// Historical data for a city, cached or fresh.
    ///
    /// The city is resolved case-insensitively before any cache or
    /// upstream interaction; an unknown city fails immediately.
    pub async fn city_history(&self, city: &str, force_refresh: bool) -> ProxyResult<Value> {
        let city = City::parse(city).ok_or_else(|| ProxyError::UnknownCity(city.to_string()))?;

        self.fetch_or_serve(Category::History(city), force_refresh)
            .await
    }

    /// Drop every cached entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("cache cleared");
    }

    /// Shared metrics handle.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The core decision: serve fresh cache, fetch and cache, or fall
    /// back to a stale entry on fetch failure.
    async fn fetch_or_serve(&self, category: Category, force_refresh: bool) -> ProxyResult<Value> {
        let key = category.cache_key();

        if !force_refresh && self.cache.is_valid(&key) {
            if let Some(entry) = self.cache.get(&key) {
                debug!("cache hit for {}", key);
                self.metrics.record_cache_hit();
                return Ok(entry.payload);
            }
        }

        self.metrics.record_cache_miss();
        let url = category.upstream_url(&self.config);

        match self.upstream.fetch_json(url).await {
            Ok(payload) => {
                self.cache.insert(&key, payload.clone());
                Ok(payload)
            }
            Err(cause) => {
                warn!("error fetching {}: {}", category, cause);

                // Stale is acceptable; expiry only gates the fast path above
                if let Some(entry) = self.cache.get(&key) {
                    self.metrics.record_stale_fallback();
                    debug!("serving stale entry for {}", key);
                    return Ok(entry.payload);
                }

                Err(ProxyError::FetchFailed { category, cause })
            }
        }
    }
}

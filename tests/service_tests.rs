//! Behavioral tests for the fetch-or-serve orchestration, using a mock
//! upstream fetcher.

mod mocks;

use mocks::MockUpstreamFetcher;
use rates_proxy::{Config, Metrics, ProxyError, RateCache, RatesService};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn build_service(upstream: &MockUpstreamFetcher, cache_ms: u64) -> RatesService {
    let config = Arc::new(Config::default());
    RatesService::new(
        Arc::new(upstream.clone()),
        RateCache::with_millis(cache_ms),
        config,
        Metrics::new(),
    )
}

fn configured_mock() -> MockUpstreamFetcher {
    let config = Config::default();
    let mock = MockUpstreamFetcher::new();
    mock.set_response(&config.rates_url, json!({"usd": 14500}));
    mock.set_response(&config.damascus_history_url, json!([{"day": 1}]));
    mock.set_response(&config.aleppo_history_url, json!([{"day": 2}]));
    mock.set_response(&config.idlib_history_url, json!([{"day": 3}]));
    mock
}

#[tokio::test]
async fn valid_cache_is_served_without_upstream_call() {
    let mock = configured_mock();
    let service = build_service(&mock, 60_000);

    let first = service.latest_rates(false).await.unwrap();
    let second = service.latest_rates(false).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(mock.call_count(), 1, "second request must be a cache hit");
    assert_eq!(service.metrics().cache_hits(), 1);
    assert_eq!(service.metrics().cache_misses(), 1);
}

#[tokio::test]
async fn empty_cache_always_fetches_once() {
    for force in [false, true] {
        let mock = configured_mock();
        let service = build_service(&mock, 60_000);

        service.latest_rates(force).await.unwrap();
        assert_eq!(mock.call_count(), 1, "force={}", force);
    }
}

#[tokio::test]
async fn force_refresh_bypasses_valid_cache() {
    let mock = configured_mock();
    let service = build_service(&mock, 60_000);

    service.latest_rates(false).await.unwrap();
    service.latest_rates(true).await.unwrap();

    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn upstream_failure_serves_stale_entry_unchanged() {
    let mock = configured_mock();
    // Tiny freshness window so the entry expires before the second request
    let service = build_service(&mock, 10);

    let original = service.latest_rates(false).await.unwrap();

    tokio::time::sleep(Duration::from_millis(30)).await;
    mock.set_failing(true);

    let fallback = service.latest_rates(false).await.unwrap();
    assert_eq!(fallback, original, "stale payload must be returned unchanged");
    assert_eq!(mock.call_count(), 2, "expired entry still triggers a fetch");
    assert_eq!(service.metrics().stale_fallbacks(), 1);
}

#[tokio::test]
async fn upstream_failure_with_force_serves_stale_entry() {
    let mock = configured_mock();
    let service = build_service(&mock, 60_000);

    let original = service.city_history("damascus", false).await.unwrap();

    mock.set_failing(true);
    let fallback = service.city_history("damascus", true).await.unwrap();

    assert_eq!(fallback, original);
}

#[tokio::test]
async fn upstream_failure_without_cache_is_fetch_failed() {
    let mock = MockUpstreamFetcher::new();
    mock.set_failing(true);
    let service = build_service(&mock, 60_000);

    let err = service.latest_rates(false).await.unwrap_err();
    assert!(matches!(err, ProxyError::FetchFailed { .. }));
    assert_eq!(err.to_string(), "Failed to fetch exchange rates");

    let err = service.city_history("idlib", false).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch historical data for idlib");
}

#[tokio::test]
async fn clear_cache_forces_refetch_of_every_key() {
    let mock = configured_mock();
    let service = build_service(&mock, 60_000);

    service.latest_rates(false).await.unwrap();
    service.city_history("damascus", false).await.unwrap();
    assert_eq!(mock.call_count(), 2);

    service.clear_cache();

    // With upstream now failing there is no stale entry left to fall back on
    mock.set_failing(true);
    assert!(service.latest_rates(false).await.is_err());
    assert!(service.city_history("damascus", false).await.is_err());
}

#[tokio::test]
async fn city_resolution_is_case_insensitive() {
    let mock = configured_mock();
    let config = Config::default();
    let service = build_service(&mock, 60_000);

    service.city_history("Damascus", false).await.unwrap();
    service.city_history("DAMASCUS", false).await.unwrap();
    service.city_history("damascus", false).await.unwrap();

    // All three share one cache key, so only the first goes upstream
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.calls(), vec![config.damascus_history_url.clone()]);
}

#[tokio::test]
async fn unknown_city_fails_fast_without_side_effects() {
    let mock = configured_mock();
    let service = build_service(&mock, 60_000);

    let err = service.city_history("beirut", false).await.unwrap_err();
    assert!(matches!(err, ProxyError::UnknownCity(ref c) if c == "beirut"));
    assert_eq!(err.to_string(), "Unknown city: beirut");
    assert_eq!(mock.call_count(), 0);
    assert_eq!(service.metrics().cache_misses(), 0);
}

#[tokio::test]
async fn each_category_has_its_own_cache_entry() {
    let mock = configured_mock();
    let service = build_service(&mock, 60_000);

    let rates = service.latest_rates(false).await.unwrap();
    let damascus = service.city_history("damascus", false).await.unwrap();
    let aleppo = service.city_history("aleppo", false).await.unwrap();

    assert_ne!(rates, damascus);
    assert_ne!(damascus, aleppo);
    assert_eq!(mock.call_count(), 3);

    // All served from cache now
    service.latest_rates(false).await.unwrap();
    service.city_history("damascus", false).await.unwrap();
    service.city_history("aleppo", false).await.unwrap();
    assert_eq!(mock.call_count(), 3);
}

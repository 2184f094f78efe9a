//! Rates Proxy - Main entry point
//!
//! Builds the cache, upstream client and service once, then serves HTTP
//! until the process is stopped.

use anyhow::Result;
use rates_proxy::{
    AppState, Config, Metrics, RateCache, RatesService, UpstreamClient, UreqUpstreamFetcher,
};
use rates_proxy::client::UpstreamFetcher;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so the log level default can come from it
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded successfully");
    info!(
        "Cache duration: {} ms, upstream timeout: {} s",
        config.cache_duration_ms, config.request_timeout
    );
    if config.is_production() {
        info!("Production mode: serving static assets from {}", config.static_dir);
    }

    let config = Arc::new(config);
    let metrics = Metrics::new();

    let sync_client = UpstreamClient::new(&config, metrics.clone());
    let upstream = Arc::new(UreqUpstreamFetcher::new(sync_client)) as Arc<dyn UpstreamFetcher>;

    let cache = RateCache::with_millis(config.cache_duration_ms);
    let service = Arc::new(RatesService::new(
        upstream,
        cache,
        config.clone(),
        metrics,
    ));

    let state = Arc::new(AppState {
        service,
        config: config.clone(),
    });

    if let Err(e) = rates_proxy::server::run_server(state).await {
        error!("Server error: {}", e);
        return Err(anyhow::anyhow!(e.to_string()));
    }

    Ok(())
}

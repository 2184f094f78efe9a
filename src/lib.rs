//! Rates Proxy - a caching HTTP proxy for Syrian pound exchange-rate data.
//!
//! The proxy fronts a fixed set of upstream endpoints (latest rates plus
//! per-city history), caches each payload in memory for a configurable
//! duration, and falls back to stale cached data when an upstream fetch
//! fails.
//!
//! # Architecture
//!
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **category**: Resolution of requests to cache keys and upstream URLs
//! - **cache**: In-memory payload store with a freshness window
//! - **client**: HTTP client for the upstream endpoints
//! - **services**: Fetch-or-serve orchestration with stale fallback
//! - **metrics**: Counters for upstream traffic and cache effectiveness
//! - **models**: Typed response bodies for the proxy's own endpoints
//! - **server**: Inbound hyper HTTP server and routing

pub mod cache;
pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;

pub use cache::{CacheEntry, RateCache};
pub use category::{Category, City};
pub use client::{UpstreamClient, UpstreamFetcher, UreqUpstreamFetcher};
pub use config::Config;
pub use error::{ConfigError, ProxyError, UpstreamError};
pub use metrics::Metrics;
pub use server::AppState;
pub use services::RatesService;

//! Async seam over the synchronous upstream client.
//!
//! Runs blocking HTTP calls on the tokio blocking pool via
//! `tokio::task::spawn_blocking`, so a slow upstream never stalls the
//! async runtime. The trait is also the substitution point for tests.

use crate::client::UpstreamClient;
use crate::error::{UpstreamError, UpstreamResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async interface to an upstream fetch.
///
/// A single attempt per call; retries and fallback policy live in the
/// service layer, not here.
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    async fn fetch_json(&self, base_url: &str) -> UpstreamResult<Value>;
}

/// [`UpstreamFetcher`] backed by the synchronous [`UpstreamClient`].
#[derive(Clone)]
pub struct UreqUpstreamFetcher {
    client: Arc<UpstreamClient>,
}

impl UreqUpstreamFetcher {
    pub fn new(client: UpstreamClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl UpstreamFetcher for UreqUpstreamFetcher {
    async fn fetch_json(&self, base_url: &str) -> UpstreamResult<Value> {
        let client = self.client.clone();
        let url = base_url.to_string();

        tokio::task::spawn_blocking(move || client.fetch_json(&url))
            .await
            .map_err(|e| UpstreamError::Transport(format!("Task join error: {}", e)))?
    }
}

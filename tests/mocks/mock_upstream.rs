use async_trait::async_trait;
use rates_proxy::error::{UpstreamError, UpstreamResult};
use rates_proxy::UpstreamFetcher;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock upstream fetcher for testing.
///
/// Can be configured with per-URL payloads or flipped into a failing
/// state, and records every fetch for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockUpstreamFetcher {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    failing: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockUpstreamFetcher {
    /// Create a new mock with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the payload returned for a URL.
    pub fn set_response(&self, url: &str, payload: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), payload);
    }

    /// When `failing` is set, every fetch fails with a transport error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// URLs fetched, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamFetcher for MockUpstreamFetcher {
    async fn fetch_json(&self, base_url: &str) -> UpstreamResult<Value> {
        self.calls.lock().unwrap().push(base_url.to_string());

        if *self.failing.lock().unwrap() {
            return Err(UpstreamError::Transport(
                "simulated upstream failure".to_string(),
            ));
        }

        match self.responses.lock().unwrap().get(base_url) {
            Some(payload) => Ok(payload.clone()),
            None => Err(UpstreamError::Status {
                status: 404,
                message: format!("no mock response for {}", base_url),
            }),
        }
    }
}

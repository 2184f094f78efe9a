//! Inbound HTTP server.
//!
//! A plain hyper accept loop: one spawned task per connection, routing
//! handled by [`handlers::route`]. All request state lives in a single
//! [`AppState`] shared via `Arc`.

pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::services::RatesService;

/// Shared state handed to every connection task.
pub struct AppState {
    pub service: Arc<RatesService>,
    pub config: Arc<Config>,
}

/// Bind the listen port and serve connections until the process exits.
pub async fn run_server(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    tracing::info!("Proxy server running on port {}", state.config.port);

    let listener = TcpListener::bind(addr).await?;

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        tracing::debug!("Accepted connection from {}", peer_addr);

        let state = state.clone();
        tokio::task::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| handlers::route(state.clone(), req));

            if let Err(err) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(io, service)
                .await
            {
                tracing::error!("Error serving connection from {}: {}", peer_addr, err);
            }
        });
    }
}

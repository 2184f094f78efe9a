//! Request routing and response construction.
//!
//! The routing itself is decoupled from hyper's request body type so the
//! handlers can be exercised directly in tests: [`route`] extracts the
//! method, path and query and delegates to [`handle`].

use std::convert::Infallible;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;

use crate::error::ProxyError;
use crate::models::{ClearCacheResponse, ErrorResponse, HealthResponse};
use crate::server::AppState;

/// hyper entry point: one call per inbound request.
pub async fn route(
    state: Arc<AppState>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);

    Ok(handle(state, &method, &path, query.as_deref()).await)
}

/// Dispatch a request to its handler.
pub async fn handle(
    state: Arc<AppState>,
    method: &Method,
    path: &str,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::OPTIONS, _) => preflight_response(),
        (&Method::GET, "/api/rates") => {
            let force = force_requested(query);
            match state.service.latest_rates(force).await {
                Ok(payload) => json_response(StatusCode::OK, &payload),
                Err(err) => error_response(&err),
            }
        }
        (&Method::GET, _) if path.starts_with("/api/history/") => {
            let city = &path["/api/history/".len()..];
            let force = force_requested(query);
            match state.service.city_history(city, force).await {
                Ok(payload) => json_response(StatusCode::OK, &payload),
                Err(err) => error_response(&err),
            }
        }
        (&Method::GET, "/api/health") => json_response(StatusCode::OK, &HealthResponse::ok_now()),
        (&Method::POST, "/api/cache/clear") => {
            state.service.clear_cache();
            json_response(StatusCode::OK, &ClearCacheResponse::cleared())
        }
        (&Method::GET, _) if state.config.is_production() && !path.starts_with("/api/") => {
            serve_static(&state.config.static_dir, path).await
        }
        _ => not_found(),
    }
}

/// Whether the query string asks for a forced refresh (`force=true`).
fn force_requested(query: Option<&str>) -> bool {
    query
        .map(|q| q.split('&').any(|pair| pair == "force=true"))
        .unwrap_or(false)
}

/// Map a service error to its HTTP representation.
fn error_response(err: &ProxyError) -> Response<Full<Bytes>> {
    let status = match err {
        ProxyError::UnknownCity(_) => StatusCode::BAD_REQUEST,
        ProxyError::FetchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    json_response(status, &ErrorResponse::new(err.to_string()))
}

fn not_found() -> Response<Full<Bytes>> {
    json_response(StatusCode::NOT_FOUND, &ErrorResponse::new("Not found"))
}

/// Answer a CORS preflight; every origin is allowed.
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type")
        .body(Full::new(Bytes::new()))
        .unwrap_or_default()
}

/// Build a JSON response with the given status.
fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_vec(body).unwrap_or_default();

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_default()
}

/// Serve a static asset, falling back to `index.html` for unknown paths.
///
/// Unknown paths fall back to the SPA entry point so client-side routes
/// resolve after a page reload.
async fn serve_static(static_dir: &str, path: &str) -> Response<Full<Bytes>> {
    let Some(relative) = sanitize_path(path) else {
        return not_found();
    };

    let full_path = Path::new(static_dir).join(&relative);
    match tokio::fs::read(&full_path).await {
        Ok(bytes) => file_response(&full_path, bytes),
        Err(_) => {
            let index = Path::new(static_dir).join("index.html");
            match tokio::fs::read(&index).await {
                Ok(bytes) => file_response(&index, bytes),
                Err(_) => not_found(),
            }
        }
    }
}

/// Normalize a request path into a safe relative file path.
///
/// Rejects anything containing parent-directory components.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let relative = if trimmed.is_empty() {
        "index.html"
    } else {
        trimmed
    };

    let candidate = PathBuf::from(relative);
    for component in candidate.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }

    Some(candidate)
}

fn file_response(path: &Path, bytes: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type_for(path))
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Full::new(Bytes::from(bytes)))
        .unwrap_or_default()
}

/// Content type by file extension.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

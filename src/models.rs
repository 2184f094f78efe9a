//! Response bodies for the non-data endpoints.
//!
//! Data endpoints relay the upstream payload verbatim as opaque JSON, so
//! only the proxy's own responses get typed models.

use serde::Serialize;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    /// Healthy, stamped with the current wall-clock time.
    pub fn ok_now() -> Self {
        Self {
            status: "ok",
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Body of `POST /api/cache/clear`.
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ClearCacheResponse {
    pub fn cleared() -> Self {
        Self {
            success: true,
            message: "Cache cleared successfully",
        }
    }
}

/// Error body shared by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

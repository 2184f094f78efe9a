//! Error types for the rates proxy.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::category::Category;
use thiserror::Error;

/// Errors that can occur while fetching from an upstream endpoint.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Network-level failure, including timeouts
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream returned a non-2xx status code
    #[error("upstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("malformed upstream body: {0}")]
    MalformedBody(String),
}

/// Errors surfaced to callers of the fetch-or-serve service.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Client asked for a city the proxy does not know about.
    ///
    /// Resolved before any cache or upstream interaction.
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Upstream failed and no cached entry (not even a stale one) exists
    #[error("{}", .category.failure_message())]
    FetchFailed {
        category: Category,
        #[source]
        cause: UpstreamError,
    },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with UpstreamError
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Convenience type alias for Results with ProxyError
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

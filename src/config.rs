//! Configuration management for the rates proxy.
//!
//! All values have defaults and can be overridden from the environment
//! (or a `.env` file). Upstream URLs are injectable mainly so tests can
//! point the proxy at a local mock server.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default latest-rates endpoint.
pub const DEFAULT_RATES_URL: &str = "https://lirat.org/wp-json/alba-cur/cur/1.json";

/// Default per-city historical-data endpoints.
pub const DEFAULT_DAMASCUS_HISTORY_URL: &str =
    "https://lirat.org/wp-json/currency-route/currency/9/damascus.json";
pub const DEFAULT_ALEPPO_HISTORY_URL: &str =
    "https://lirat.org/wp-json/currency-route/currency/9/aleppo.json";
pub const DEFAULT_IDLIB_HISTORY_URL: &str =
    "https://lirat.org/wp-json/currency-route/currency/9/idlib.json";

/// Default cache duration: 15 minutes, in milliseconds.
pub const DEFAULT_CACHE_DURATION_MS: u64 = 15 * 60 * 1000;

/// Configuration for the rates proxy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port (default: 5000)
    pub port: u16,

    /// How long a cached payload counts as fresh, in milliseconds (default: 900000)
    pub cache_duration_ms: u64,

    /// Upstream HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Latest-rates endpoint
    pub rates_url: String,

    /// Historical-data endpoints, one per city
    pub damascus_history_url: String,
    pub aleppo_history_url: String,
    pub idlib_history_url: String,

    /// Run environment; `production` enables static-asset serving
    pub app_env: String,

    /// Directory served for non-API paths in production (default: "build")
    pub static_dir: String,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `PORT`: listen port (default: 5000)
    /// - `CACHE_DURATION`: cache freshness window in milliseconds (default: 900000)
    /// - `REQUEST_TIMEOUT`: upstream timeout in seconds (default: 10)
    /// - `RATES_API_URL`, `DAMASCUS_HISTORY_API`, `ALEPPO_HISTORY_API`,
    ///   `IDLIB_HISTORY_API`: upstream endpoint overrides
    /// - `APP_ENV`: `production` enables static serving (default: "development")
    /// - `STATIC_DIR`: static asset directory (default: "build")
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let port = Self::parse_env_u16("PORT", 5000)?;
        let cache_duration_ms = Self::parse_env_u64("CACHE_DURATION", DEFAULT_CACHE_DURATION_MS)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        let rates_url = Self::parse_env_url("RATES_API_URL", DEFAULT_RATES_URL)?;
        let damascus_history_url =
            Self::parse_env_url("DAMASCUS_HISTORY_API", DEFAULT_DAMASCUS_HISTORY_URL)?;
        let aleppo_history_url =
            Self::parse_env_url("ALEPPO_HISTORY_API", DEFAULT_ALEPPO_HISTORY_URL)?;
        let idlib_history_url =
            Self::parse_env_url("IDLIB_HISTORY_API", DEFAULT_IDLIB_HISTORY_URL)?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "build".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            port,
            cache_duration_ms,
            request_timeout,
            rates_url,
            damascus_history_url,
            aleppo_history_url,
            idlib_history_url,
            app_env,
            static_dir,
            log_level,
        })
    }

    /// Whether static-asset serving is enabled.
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Read an environment variable holding a URL, validating the scheme.
    fn parse_env_url(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = env::var(var_name).unwrap_or_else(|_| default.to_string());

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        Ok(url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5000,
            cache_duration_ms: DEFAULT_CACHE_DURATION_MS,
            request_timeout: 10,
            rates_url: DEFAULT_RATES_URL.to_string(),
            damascus_history_url: DEFAULT_DAMASCUS_HISTORY_URL.to_string(),
            aleppo_history_url: DEFAULT_ALEPPO_HISTORY_URL.to_string(),
            idlib_history_url: DEFAULT_IDLIB_HISTORY_URL.to_string(),
            app_env: "development".to_string(),
            static_dir: "build".to_string(),
            log_level: "info".to_string(),
        }
    }
}

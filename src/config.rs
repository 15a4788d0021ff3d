//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::aggregate::{LATEST_POSTS_LIMIT, TOP_USERS_LIMIT};
use crate::cache::DEFAULT_TTL_MS;
use crate::fetcher::DEFAULT_BASE_URL;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream REST API base URL
    pub api_base_url: String,
    /// Process-wide cache TTL in milliseconds
    pub cache_ttl_ms: u64,
    /// Interval between background refreshes in milliseconds
    pub refresh_interval_ms: u64,
    /// Per-request upstream timeout in milliseconds
    pub request_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Size of the top users view
    pub top_users_limit: usize,
    /// Size of the latest posts view
    pub latest_posts_limit: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Upstream base URL (default: JSONPlaceholder)
    /// - `CACHE_TTL_MS` - Cache TTL in milliseconds (default: 30000)
    /// - `REFRESH_INTERVAL_MS` - Background refresh interval (default: 60000)
    /// - `REQUEST_TIMEOUT_MS` - Upstream request timeout (default: 10000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `TOP_USERS_LIMIT` - Top users view size (default: 5)
    /// - `LATEST_POSTS_LIMIT` - Latest posts view size (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            cache_ttl_ms: env_or("CACHE_TTL_MS", defaults.cache_ttl_ms),
            refresh_interval_ms: env_or("REFRESH_INTERVAL_MS", defaults.refresh_interval_ms),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            top_users_limit: env_or("TOP_USERS_LIMIT", defaults.top_users_limit),
            latest_posts_limit: env_or("LATEST_POSTS_LIMIT", defaults.latest_posts_limit),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl_ms: DEFAULT_TTL_MS,
            refresh_interval_ms: 60_000,
            request_timeout_ms: 10_000,
            server_port: 3000,
            top_users_limit: TOP_USERS_LIMIT,
            latest_posts_limit: LATEST_POSTS_LIMIT,
        }
    }
}

//! Response DTOs for the insights API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::service::RefreshOutcome;

/// Response body for POST /insights/refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    /// True when every upstream fetch succeeded
    pub success: bool,
    /// Upstream resources that failed during the refresh
    pub failures: Vec<String>,
    /// Human-readable summary
    pub message: String,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            success: outcome.is_success(),
            message: outcome.message(),
            failures: outcome
                .failures
                .iter()
                .map(|failure| failure.to_string())
                .collect(),
        }
    }
}

/// Response body for PUT /cache/ttl
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    /// Success message
    pub message: String,
    /// The TTL now in effect
    pub ttl_ms: u64,
}

impl TtlResponse {
    /// Creates a new TtlResponse
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            message: format!("Cache TTL set to {} ms", ttl_ms),
            ttl_ms,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of fresh cache reads
    pub hits: u64,
    /// Number of missing or stale cache reads
    pub misses: u64,
    /// Number of forced invalidations
    pub invalidations: u64,
    /// Number of populated cache keys
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Process-wide TTL in milliseconds
    pub ttl_ms: u64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, ttl_ms: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            invalidations: stats.invalidations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_ms,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

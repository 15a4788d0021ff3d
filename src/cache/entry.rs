//! Cache Entry Module
//!
//! Defines the timestamped wrapper stored under each cache key.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A cached value together with the time it was captured.
///
/// Entries carry no TTL of their own: freshness is always judged against the
/// store-wide TTL in effect at read time.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Capture timestamp (Unix milliseconds); 0 once invalidated
    pub timestamp: u64,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with `now`.
    pub fn new(data: T, now: u64) -> Self {
        Self {
            data,
            timestamp: now,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still valid under `ttl_ms`.
    ///
    /// Boundary condition: an entry aged exactly `ttl_ms` is stale, so a TTL
    /// of zero makes every entry stale.
    pub fn is_fresh(&self, ttl_ms: u64, now: u64) -> bool {
        self.age_ms(now) < ttl_ms
    }

    // == Age ==
    /// Milliseconds elapsed since capture. A timestamp in the future counts as age 0.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.timestamp)
    }

    // == Invalidate ==
    /// Resets the timestamp to the epoch, keeping the value.
    pub fn invalidate(&mut self) {
        self.timestamp = 0;
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

//! Cache counters reported by `GET /stats`.
//!
//! A read of one of the six insight keys is either served from a fresh
//! collection or falls through to upstream. Invalidations come from
//! refreshes, which mark every populated key stale at once.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of how the insight keys have been served.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads served from a collection younger than the TTL
    pub hits: u64,
    /// Reads that went upstream: key never stored, stale, or invalidated
    pub misses: u64,
    /// Keys marked stale by a refresh or an explicit invalidate
    pub invalidations: u64,
    /// Keys holding a collection, fresh or stale (at most six)
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of reads that avoided an upstream fetch, 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// A full refresh reports every populated key in one call.
    pub fn record_invalidations(&mut self, keys: usize) {
        self.invalidations += keys as u64;
    }

    pub fn set_total_entries(&mut self, keys: usize) {
        self.total_entries = keys;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_are_zero() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.invalidations, 0);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_after_views_are_served() {
        let mut stats = CacheStats::new();
        // First read of a view and its raw posts miss, later reads hit
        stats.record_miss();
        stats.record_miss();
        for _ in 0..6 {
            stats.record_hit();
        }
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_refreshes_accumulate_invalidations() {
        let mut stats = CacheStats::new();
        stats.record_invalidations(6);
        stats.record_invalidations(4);
        assert_eq!(stats.invalidations, 10);
    }
}

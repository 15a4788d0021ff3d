//! Cache Module
//!
//! Provides in-memory memoization of collections with a process-wide TTL.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::{CacheKey, CacheStore, Cacheable, CachedValue};

// == Public Constants ==
/// Default TTL in milliseconds
pub const DEFAULT_TTL_MS: u64 = 30_000;

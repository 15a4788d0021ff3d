//! Cache Store Module
//!
//! Keyed, timestamped memoization of raw and derived collections under a
//! single process-wide TTL.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats};
use crate::models::{Comment, Post, User};

// == Cache Key ==
/// The fixed set of logical cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Users,
    Posts,
    Comments,
    TopFiveUsers,
    PopularPosts,
    LatestPosts,
}

impl CacheKey {
    /// Every key, in declaration order.
    pub const ALL: [CacheKey; 6] = [
        CacheKey::Users,
        CacheKey::Posts,
        CacheKey::Comments,
        CacheKey::TopFiveUsers,
        CacheKey::PopularPosts,
        CacheKey::LatestPosts,
    ];
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheKey::Users => "users",
            CacheKey::Posts => "posts",
            CacheKey::Comments => "comments",
            CacheKey::TopFiveUsers => "topFiveUsers",
            CacheKey::PopularPosts => "popularPosts",
            CacheKey::LatestPosts => "latestPosts",
        };
        f.write_str(name)
    }
}

// == Cached Value ==
/// A shared collection held by the store.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Users(Arc<Vec<User>>),
    Posts(Arc<Vec<Post>>),
    Comments(Arc<Vec<Comment>>),
}

/// Element types whose collections can be stored in a [`CacheStore`].
pub trait Cacheable: Sized {
    fn wrap(data: Arc<Vec<Self>>) -> CachedValue;
    fn unwrap(value: &CachedValue) -> Option<Arc<Vec<Self>>>;
}

impl Cacheable for User {
    fn wrap(data: Arc<Vec<Self>>) -> CachedValue {
        CachedValue::Users(data)
    }

    fn unwrap(value: &CachedValue) -> Option<Arc<Vec<Self>>> {
        match value {
            CachedValue::Users(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }
}

impl Cacheable for Post {
    fn wrap(data: Arc<Vec<Self>>) -> CachedValue {
        CachedValue::Posts(data)
    }

    fn unwrap(value: &CachedValue) -> Option<Arc<Vec<Self>>> {
        match value {
            CachedValue::Posts(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }
}

impl Cacheable for Comment {
    fn wrap(data: Arc<Vec<Self>>) -> CachedValue {
        CachedValue::Comments(data)
    }

    fn unwrap(value: &CachedValue) -> Option<Arc<Vec<Self>>> {
        match value {
            CachedValue::Comments(data) => Some(Arc::clone(data)),
            _ => None,
        }
    }
}

// == Cache Store ==
/// TTL-based memoization store.
///
/// There is no eviction: the key set is fixed and entries only go stale.
#[derive(Debug)]
pub struct CacheStore {
    /// Timestamped values by key
    entries: HashMap<CacheKey, CacheEntry<CachedValue>>,
    /// Process-wide TTL in milliseconds
    ttl_ms: u64,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with the given TTL in milliseconds.
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Returns the value under `key` if it is still fresh.
    pub fn get<T: Cacheable>(&mut self, key: CacheKey) -> Option<Arc<Vec<T>>> {
        self.get_at(key, current_timestamp_ms())
    }

    /// Same as [`CacheStore::get`], judged at time `now` (Unix ms).
    ///
    /// A stale entry, a missing entry, or an entry of another element type
    /// all count as a miss.
    pub fn get_at<T: Cacheable>(&mut self, key: CacheKey, now: u64) -> Option<Arc<Vec<T>>> {
        let hit = self
            .entries
            .get(&key)
            .filter(|entry| entry.is_fresh(self.ttl_ms, now))
            .and_then(|entry| T::unwrap(&entry.data));

        match hit {
            Some(data) => {
                self.stats.record_hit();
                Some(data)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Returns the value under `key` regardless of freshness.
    ///
    /// Does not touch hit/miss statistics.
    pub fn peek<T: Cacheable>(&self, key: CacheKey) -> Option<Arc<Vec<T>>> {
        self.entries.get(&key).and_then(|entry| T::unwrap(&entry.data))
    }

    // == Put ==
    /// Stores `data` under `key`, overwriting any previous value.
    pub fn put<T: Cacheable>(&mut self, key: CacheKey, data: Arc<Vec<T>>) {
        self.put_at(key, data, current_timestamp_ms());
    }

    /// Same as [`CacheStore::put`], stamped with `now` (Unix ms).
    pub fn put_at<T: Cacheable>(&mut self, key: CacheKey, data: Arc<Vec<T>>, now: u64) {
        self.entries.insert(key, CacheEntry::new(T::wrap(data), now));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores `data` under `key` and returns the value it replaced, fresh or stale.
    pub fn replace<T: Cacheable>(
        &mut self,
        key: CacheKey,
        data: Arc<Vec<T>>,
    ) -> Option<Arc<Vec<T>>> {
        let previous = self.peek(key);
        self.put(key, data);
        previous
    }

    // == Invalidate ==
    /// Forces the next `get` of `key` to miss. The value stays readable via `peek`.
    ///
    /// Returns false when nothing is stored under `key`.
    pub fn invalidate(&mut self, key: CacheKey) -> bool {
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.invalidate();
                self.stats.record_invalidations(1);
                true
            }
            None => false,
        }
    }

    /// Invalidates every stored key and returns how many were touched.
    pub fn invalidate_all(&mut self) -> usize {
        let mut count = 0;
        for entry in self.entries.values_mut() {
            entry.invalidate();
            count += 1;
        }
        self.stats.record_invalidations(count);
        count
    }

    // == TTL ==
    /// Replaces the process-wide TTL. Existing entries keep their timestamps.
    pub fn set_ttl(&mut self, ttl_ms: u64) {
        self.ttl_ms = ttl_ms;
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of populated keys, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

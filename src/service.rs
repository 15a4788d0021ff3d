//! Insights Service
//!
//! The single cache object shared by every consumer. It pulls raw
//! collections through the [`DataSource`], memoizes raw and derived
//! collections in the [`CacheStore`], and exposes the derived views.
//!
//! Concurrent views needing the same expired key each fetch it; there is no
//! request coalescing and the last `put` wins.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::cache::{CacheKey, CacheStats, CacheStore, Cacheable};
use crate::config::Config;
use crate::error::FetchError;
use crate::fetcher::{DataSource, FetchResult};
use crate::models::{Comment, Post, User};
use crate::notify::{Notice, Notifier};

// == Posts Mode ==
/// Which posts view to compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostsMode {
    /// Highest ids first
    #[default]
    Latest,
    /// Every post tied at the highest comment count
    Popular,
}

impl PostsMode {
    fn cache_key(self) -> CacheKey {
        match self {
            PostsMode::Latest => CacheKey::LatestPosts,
            PostsMode::Popular => CacheKey::PopularPosts,
        }
    }
}

impl fmt::Display for PostsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostsMode::Latest => f.write_str("latest"),
            PostsMode::Popular => f.write_str("popular"),
        }
    }
}

// == Refresh Outcome ==
/// Aggregate result of a full refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshOutcome {
    /// One entry per upstream resource that failed
    pub failures: Vec<FetchError>,
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn message(&self) -> String {
        if self.is_success() {
            return "Data refreshed successfully".to_string();
        }
        let resources: Vec<String> = self
            .failures
            .iter()
            .map(|failure| failure.resource().to_string())
            .collect();
        format!("Failed to refresh data: {}", resources.join(", "))
    }
}

/// A derived view plus the fetch failures it degraded over.
struct View<T> {
    items: Arc<Vec<T>>,
    failures: Vec<FetchError>,
}

impl<T> View<T> {
    fn cached(items: Arc<Vec<T>>) -> Self {
        Self {
            items,
            failures: Vec::new(),
        }
    }
}

// == Insights Service ==
pub struct InsightsService {
    source: Arc<dyn DataSource>,
    cache: RwLock<CacheStore>,
    notifier: Notifier,
    top_users_limit: usize,
    latest_posts_limit: usize,
}

impl InsightsService {
    /// Creates a service over `source` with the given TTL and default view sizes.
    pub fn new(source: Arc<dyn DataSource>, ttl_ms: u64) -> Self {
        Self {
            source,
            cache: RwLock::new(CacheStore::new(ttl_ms)),
            notifier: Notifier::new(),
            top_users_limit: aggregate::TOP_USERS_LIMIT,
            latest_posts_limit: aggregate::LATEST_POSTS_LIMIT,
        }
    }

    /// Creates a service using the TTL and view sizes from `config`.
    pub fn from_config(config: &Config, source: Arc<dyn DataSource>) -> Self {
        Self::new(source, config.cache_ttl_ms)
            .with_limits(config.top_users_limit, config.latest_posts_limit)
    }

    /// Overrides the top users and latest posts view sizes.
    pub fn with_limits(mut self, top_users: usize, latest_posts: usize) -> Self {
        self.top_users_limit = top_users;
        self.latest_posts_limit = latest_posts;
        self
    }

    // == Derived Views ==

    /// Up to five users ranked by post count.
    pub async fn top_five_users(&self) -> Arc<Vec<User>> {
        self.top_users_view().await.items
    }

    /// Latest or most commented posts.
    pub async fn latest_posts(&self, mode: PostsMode) -> Arc<Vec<Post>> {
        self.posts_view(mode).await.items
    }

    // == Raw Collections ==

    pub async fn users(&self) -> Arc<Vec<User>> {
        self.load_users().await.unwrap_or_default()
    }

    pub async fn posts(&self) -> Arc<Vec<Post>> {
        self.load_posts().await.unwrap_or_default()
    }

    pub async fn comments(&self) -> Arc<Vec<Comment>> {
        self.load_comments().await.unwrap_or_default()
    }

    /// Comments of one post, fetched directly from upstream without caching.
    pub async fn post_comments(&self, post_id: u64) -> Vec<Comment> {
        match self.source.fetch_post_comments(post_id).await {
            Ok(comments) => comments,
            Err(err) => {
                self.report_failure(&err);
                Vec::new()
            }
        }
    }

    // == Refresh ==

    /// Invalidates every cache key and recomputes all views.
    ///
    /// Failed fetches never abort the other views; they are collected into
    /// the returned outcome, one entry per resource.
    pub async fn refresh_all(&self) -> RefreshOutcome {
        self.notifier.info("Refreshing data...");

        let invalidated = self.cache.write().await.invalidate_all();
        debug!("Invalidated {} cache entries", invalidated);

        let (top, latest, popular) = tokio::join!(
            self.top_users_view(),
            self.posts_view(PostsMode::Latest),
            self.posts_view(PostsMode::Popular)
        );

        let mut failures: Vec<FetchError> = Vec::new();
        for failure in top
            .failures
            .into_iter()
            .chain(latest.failures)
            .chain(popular.failures)
        {
            if !failures.iter().any(|f| f.resource() == failure.resource()) {
                failures.push(failure);
            }
        }

        let outcome = RefreshOutcome { failures };
        if outcome.is_success() {
            info!("Refresh complete");
            self.notifier.success(outcome.message());
        } else {
            warn!("{}", outcome.message());
            self.notifier.error(outcome.message());
        }
        outcome
    }

    // == Configuration ==

    /// Sets the process-wide TTL. Already cached entries are judged by it too.
    pub async fn set_cache_ttl(&self, ttl_ms: u64) {
        self.cache.write().await.set_ttl(ttl_ms);
        info!("Cache TTL set to {} ms", ttl_ms);
    }

    pub async fn cache_ttl(&self) -> u64 {
        self.cache.read().await.ttl_ms()
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Subscribes to user-facing notices.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    // == View Computation ==

    async fn top_users_view(&self) -> View<User> {
        if let Some(items) = self.cached(CacheKey::TopFiveUsers).await {
            return View::cached(items);
        }

        let (users, posts) = tokio::join!(self.load_users(), self.load_posts());
        let mut failures = Vec::new();
        let users = degrade(users, &mut failures);
        let posts = degrade(posts, &mut failures);

        let ranked = aggregate::top_users_by_post_count(&users, &posts, self.top_users_limit);
        self.settle_view(CacheKey::TopFiveUsers, ranked, failures)
            .await
    }

    async fn posts_view(&self, mode: PostsMode) -> View<Post> {
        let key = mode.cache_key();
        if let Some(items) = self.cached(key).await {
            return View::cached(items);
        }

        let mut failures = Vec::new();
        let derived = match mode {
            PostsMode::Latest => {
                let posts = degrade(self.load_posts().await, &mut failures);
                aggregate::latest_posts(&posts, self.latest_posts_limit)
            }
            PostsMode::Popular => {
                let (posts, comments) = tokio::join!(self.load_posts(), self.load_comments());
                let posts = degrade(posts, &mut failures);
                let comments = degrade(comments, &mut failures);
                aggregate::most_commented_posts(&posts, &comments)
            }
        };

        debug!("Computed {} posts view with {} posts", mode, derived.len());
        self.settle_view(key, derived, failures).await
    }

    /// Caches a derived view, degraded or not. A view computed over a failed
    /// fetch is served until the next expiry or refresh.
    async fn settle_view<T: Cacheable>(
        &self,
        key: CacheKey,
        derived: Vec<T>,
        failures: Vec<FetchError>,
    ) -> View<T> {
        let items = Arc::new(derived);
        self.cache.write().await.put(key, Arc::clone(&items));
        if !failures.is_empty() {
            debug!("Cached degraded {} over {} failed fetches", key, failures.len());
        }
        View { items, failures }
    }

    // == Raw Loading ==

    async fn load_users(&self) -> Result<Arc<Vec<User>>, FetchError> {
        if let Some(users) = self.cached(CacheKey::Users).await {
            return Ok(users);
        }
        let fetched = self.source.fetch_users().await;
        self.settle_raw(CacheKey::Users, fetched).await
    }

    async fn load_posts(&self) -> Result<Arc<Vec<Post>>, FetchError> {
        if let Some(posts) = self.cached(CacheKey::Posts).await {
            return Ok(posts);
        }
        match self.source.fetch_posts().await {
            Ok(posts) => {
                let posts = Arc::new(posts);
                // Compare and store under one write lock: one notice per growth
                let previous = self
                    .cache
                    .write()
                    .await
                    .replace(CacheKey::Posts, Arc::clone(&posts))
                    .map_or(0, |previous| previous.len());
                self.announce_new_posts(previous, posts.len());
                Ok(posts)
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    async fn load_comments(&self) -> Result<Arc<Vec<Comment>>, FetchError> {
        if let Some(comments) = self.cached(CacheKey::Comments).await {
            return Ok(comments);
        }
        let fetched = self.source.fetch_comments().await;
        self.settle_raw(CacheKey::Comments, fetched).await
    }

    async fn cached<T: Cacheable>(&self, key: CacheKey) -> Option<Arc<Vec<T>>> {
        self.cache.write().await.get(key)
    }

    async fn settle_raw<T: Cacheable>(
        &self,
        key: CacheKey,
        fetched: FetchResult<T>,
    ) -> Result<Arc<Vec<T>>, FetchError> {
        match fetched {
            Ok(items) => {
                let items = Arc::new(items);
                self.cache.write().await.put(key, Arc::clone(&items));
                Ok(items)
            }
            Err(err) => {
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    /// Notifies when a fetch returned more posts than the previously held
    /// (possibly stale) collection. The very first load never notifies.
    fn announce_new_posts(&self, previous: usize, fetched: usize) {
        if previous > 0 && fetched > previous {
            info!("{} new posts available", fetched - previous);
            self.notifier.success("New posts available!");
        }
    }

    fn report_failure(&self, err: &FetchError) {
        warn!("{}", err);
        self.notifier.error(err.resource().failure_notice());
    }
}

/// Collapses a failed fetch into an empty collection, keeping the error.
fn degrade<T>(
    result: Result<Arc<Vec<T>>, FetchError>,
    failures: &mut Vec<FetchError>,
) -> Arc<Vec<T>> {
    result.unwrap_or_else(|err| {
        failures.push(err);
        Arc::new(Vec::new())
    })
}

impl fmt::Debug for InsightsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightsService")
            .field("top_users_limit", &self.top_users_limit)
            .field("latest_posts_limit", &self.latest_posts_limit)
            .finish_non_exhaustive()
    }
}

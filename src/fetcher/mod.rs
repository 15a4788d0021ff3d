//! Raw Data Fetcher
//!
//! Retrieves whole collections from the upstream API. Every call is a single
//! request with an explicit [`FetchError`] outcome; nothing here retries.

mod remote;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{Comment, Post, User};

pub use remote::HttpSource;

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Result of a single upstream fetch.
pub type FetchResult<T> = std::result::Result<Vec<T>, FetchError>;

/// A remote source of users, posts and comments.
#[async_trait]
pub trait DataSource: Send + Sync + 'static {
    async fn fetch_users(&self) -> FetchResult<User>;

    async fn fetch_posts(&self) -> FetchResult<Post>;

    async fn fetch_comments(&self) -> FetchResult<Comment>;

    /// Comments attached to a single post.
    async fn fetch_post_comments(&self, post_id: u64) -> FetchResult<Comment>;
}

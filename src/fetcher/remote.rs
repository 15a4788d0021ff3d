//! HTTP data source backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{DataSource, FetchResult};
use crate::error::{FetchError, Resource};
use crate::models::{Comment, Post, User};

/// Fetches collections from a JSONPlaceholder-shaped REST API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    /// Creates a source for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a source reusing an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_collection<T: DeserializeOwned>(&self, resource: Resource) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, resource.path());
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                resource,
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource,
                status: status.as_u16(),
            });
        }

        let items: Vec<T> = response.json().await.map_err(|err| FetchError::Decode {
            resource,
            message: err.to_string(),
        })?;

        debug!("Fetched {} {}", items.len(), resource);
        Ok(items)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch_users(&self) -> FetchResult<User> {
        self.get_collection(Resource::Users).await
    }

    async fn fetch_posts(&self) -> FetchResult<Post> {
        self.get_collection(Resource::Posts).await
    }

    async fn fetch_comments(&self) -> FetchResult<Comment> {
        self.get_collection(Resource::Comments).await
    }

    async fn fetch_post_comments(&self, post_id: u64) -> FetchResult<Comment> {
        self.get_collection(Resource::PostComments(post_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = HttpSource::with_client(reqwest::Client::new(), "http://localhost:9/");
        assert_eq!(source.base_url(), "http://localhost:9");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let source = HttpSource::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

        let err = source.fetch_users().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport {
                resource: Resource::Users,
                ..
            }
        ));
    }
}

//! API Handlers
//!
//! HTTP request handlers for each insights endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::fetcher::DataSource;
use crate::models::{
    Comment, HealthResponse, Post, PostsQuery, RefreshResponse, StatsResponse, TtlRequest,
    TtlResponse, User,
};
use crate::service::InsightsService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single insights service instance
    pub service: Arc<InsightsService>,
}

impl AppState {
    /// Creates a new AppState around an existing service.
    pub fn new(service: InsightsService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration and an upstream source.
    pub fn from_config(config: &Config, source: Arc<dyn DataSource>) -> Self {
        Self::new(InsightsService::from_config(config, source))
    }
}

/// Handler for GET /insights/top-users
pub async fn top_users_handler(State(state): State<AppState>) -> Json<Vec<User>> {
    let users = state.service.top_five_users().await;
    Json(users.as_ref().clone())
}

/// Handler for GET /insights/posts?mode=latest|popular
pub async fn posts_view_handler(
    State(state): State<AppState>,
    Query(query): Query<PostsQuery>,
) -> Json<Vec<Post>> {
    let posts = state.service.latest_posts(query.mode).await;
    Json(posts.as_ref().clone())
}

/// Handler for POST /insights/refresh
pub async fn refresh_handler(State(state): State<AppState>) -> Json<RefreshResponse> {
    let outcome = state.service.refresh_all().await;
    Json(RefreshResponse::from(outcome))
}

/// Handler for PUT /cache/ttl
pub async fn set_ttl_handler(
    State(state): State<AppState>,
    Json(req): Json<TtlRequest>,
) -> Result<Json<TtlResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let ttl_ms = req.milliseconds as u64;
    state.service.set_cache_ttl(ttl_ms).await;

    Ok(Json(TtlResponse::new(ttl_ms)))
}

/// Handler for GET /users
pub async fn users_handler(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.service.users().await.as_ref().clone())
}

/// Handler for GET /posts
pub async fn posts_handler(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.service.posts().await.as_ref().clone())
}

/// Handler for GET /comments
pub async fn comments_handler(State(state): State<AppState>) -> Json<Vec<Comment>> {
    Json(state.service.comments().await.as_ref().clone())
}

/// Handler for GET /posts/:id/comments
pub async fn post_comments_handler(
    State(state): State<AppState>,
    Path(post_id): Path<u64>,
) -> Json<Vec<Comment>> {
    Json(state.service.post_comments(post_id).await)
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.stats().await;
    let ttl_ms = state.service.cache_ttl().await;

    Json(StatsResponse::new(&stats, ttl_ms))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::PostsMode;
    use crate::test_support::{comments_on, post_ids, posts, user_ids, users, ScriptedSource};

    fn test_state() -> AppState {
        let source = Arc::new(ScriptedSource::new(
            Ok(users(&[1, 2, 3])),
            Ok(posts(&[(10, 1), (11, 1), (12, 2)])),
            Ok(comments_on(&[10, 12, 12])),
        ));
        AppState::new(InsightsService::new(source, 60_000))
    }

    #[tokio::test]
    async fn test_top_users_handler() {
        let Json(top) = top_users_handler(State(test_state())).await;
        assert_eq!(user_ids(&top), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_posts_view_handler_popular() {
        let query = PostsQuery {
            mode: PostsMode::Popular,
        };
        let Json(popular) = posts_view_handler(State(test_state()), Query(query)).await;
        assert_eq!(post_ids(&popular), vec![12]);
    }

    #[tokio::test]
    async fn test_refresh_handler() {
        let Json(resp) = refresh_handler(State(test_state())).await;
        assert!(resp.success);
        assert!(resp.failures.is_empty());
    }

    #[tokio::test]
    async fn test_set_ttl_handler() {
        let state = test_state();

        let result = set_ttl_handler(
            State(state.clone()),
            Json(TtlRequest { milliseconds: 1234 }),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(state.service.cache_ttl().await, 1234);
    }

    #[tokio::test]
    async fn test_set_ttl_handler_rejects_negative() {
        let state = test_state();

        let result = set_ttl_handler(State(state.clone()), Json(TtlRequest { milliseconds: -5 })).await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(state.service.cache_ttl().await, 60_000);
    }

    #[tokio::test]
    async fn test_post_comments_handler() {
        let Json(comments) = post_comments_handler(State(test_state()), Path(12)).await;
        assert_eq!(comments.len(), 2);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let Json(stats) = stats_handler(State(test_state())).await;
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.ttl_ms, 60_000);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}

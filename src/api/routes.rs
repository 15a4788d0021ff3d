//! API Routes
//!
//! Configures the Axum router with all insights endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    comments_handler, health_handler, post_comments_handler, posts_handler, posts_view_handler,
    refresh_handler, set_ttl_handler, stats_handler, top_users_handler, users_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /insights/top-users` - Top five users by post count
/// - `GET /insights/posts?mode=latest|popular` - Latest or most commented posts
/// - `POST /insights/refresh` - Invalidate and recompute everything
/// - `PUT /cache/ttl` - Set the process-wide cache TTL
/// - `GET /users`, `GET /posts`, `GET /comments` - Raw cached collections
/// - `GET /posts/:id/comments` - Comments of one post
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/insights/top-users", get(top_users_handler))
        .route("/insights/posts", get(posts_view_handler))
        .route("/insights/refresh", post(refresh_handler))
        .route("/cache/ttl", put(set_ttl_handler))
        .route("/users", get(users_handler))
        .route("/posts", get(posts_handler))
        .route("/comments", get(comments_handler))
        .route("/posts/:id/comments", get(post_comments_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

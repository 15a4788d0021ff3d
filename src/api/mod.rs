//! API Module
//!
//! HTTP handlers and routing for the insights REST API.
//!
//! # Endpoints
//! - `GET /insights/top-users` - Top five users by post count
//! - `GET /insights/posts` - Latest or popular posts
//! - `POST /insights/refresh` - Force a full refresh
//! - `PUT /cache/ttl` - Set the cache TTL
//! - `GET /users`, `/posts`, `/comments`, `/posts/:id/comments` - Raw data
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! Social Insights - a caching aggregation service
//!
//! Fetches users, posts and comments from a public REST API, memoizes them
//! under a process-wide TTL and derives ranked views: top users by post
//! count, latest posts and most commented posts.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod notify;
pub mod service;
pub mod tasks;

#[cfg(test)]
mod test_support;

pub use api::AppState;
pub use config::Config;
pub use service::{InsightsService, PostsMode, RefreshOutcome};
pub use tasks::spawn_refresh_task;

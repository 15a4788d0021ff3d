//! Error types for the insights service
//!
//! Provides unified error handling using thiserror.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Resource ==
/// An upstream collection the fetcher can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Posts,
    Comments,
    /// Comments of a single post
    PostComments(u64),
}

impl Resource {
    /// Path of the resource relative to the upstream base URL.
    pub fn path(&self) -> String {
        match self {
            Resource::Users => "/users".to_string(),
            Resource::Posts => "/posts".to_string(),
            Resource::Comments => "/comments".to_string(),
            Resource::PostComments(id) => format!("/posts/{}/comments", id),
        }
    }

    /// Message shown to users when this resource fails to load.
    pub fn failure_notice(&self) -> String {
        match self {
            Resource::PostComments(id) => format!("Failed to load comments for post #{}", id),
            other => format!("Failed to load {}", other),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Users => write!(f, "users"),
            Resource::Posts => write!(f, "posts"),
            Resource::Comments => write!(f, "comments"),
            Resource::PostComments(id) => write!(f, "comments of post {}", id),
        }
    }
}

// == Fetch Error Enum ==
/// Failure reaching the upstream API.
///
/// A valid response with zero items is not an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, reset)
    #[error("transport error fetching {resource}: {message}")]
    Transport { resource: Resource, message: String },

    /// Upstream answered with a non-2xx status
    #[error("HTTP error fetching {resource}: status {status}")]
    Status { resource: Resource, status: u16 },

    /// Response body was not the expected JSON array
    #[error("invalid body fetching {resource}: {message}")]
    Decode { resource: Resource, message: String },
}

impl FetchError {
    /// The resource whose fetch failed.
    pub fn resource(&self) -> Resource {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Status { resource, .. }
            | FetchError::Decode { resource, .. } => *resource,
        }
    }
}

// == API Error Enum ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

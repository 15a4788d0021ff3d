//! Request DTOs for the insights API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::service::PostsMode;

/// Request body for PUT /cache/ttl
///
/// The TTL is taken as a signed integer so negative values can be rejected
/// with a readable message instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct TtlRequest {
    /// New process-wide TTL in milliseconds
    pub milliseconds: i64,
}

impl TtlRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.milliseconds < 0 {
            return Some("TTL must be a non-negative number of milliseconds".to_string());
        }
        None
    }
}

/// Query string for GET /insights/posts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsQuery {
    /// `latest` (default) or `popular`
    #[serde(default)]
    pub mode: PostsMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_request_deserialize() {
        let req: TtlRequest = serde_json::from_str(r#"{"milliseconds": 5000}"#).unwrap();
        assert_eq!(req.milliseconds, 5000);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_ttl_request_zero_is_valid() {
        let req = TtlRequest { milliseconds: 0 };
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_ttl_request_negative_rejected() {
        let req = TtlRequest { milliseconds: -1 };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_posts_query_default_mode() {
        let query: PostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.mode, PostsMode::Latest);
    }

    #[test]
    fn test_posts_query_popular() {
        let query: PostsQuery = serde_json::from_str(r#"{"mode": "popular"}"#).unwrap();
        assert_eq!(query.mode, PostsMode::Popular);
    }
}

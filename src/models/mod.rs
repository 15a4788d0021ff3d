//! Data models for the insights service
//!
//! Upstream entities plus the DTOs used for serializing/deserializing
//! HTTP request and response bodies.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{Address, Comment, Company, Geo, Post, User};
pub use requests::{PostsQuery, TtlRequest};
pub use responses::{
    ErrorResponse, HealthResponse, RefreshResponse, StatsResponse, TtlResponse,
};

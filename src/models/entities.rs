//! Upstream entity models
//!
//! Shapes of the users, posts and comments served by the upstream REST API.
//! Field names follow the upstream camelCase JSON.

use serde::{Deserialize, Serialize};

// == User ==
/// A user profile, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    /// Display name
    pub name: String,
    /// Handle
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub company: Company,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

// == Post ==
/// A post owned by the user `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

// == Comment ==
/// A comment attached to the post `post_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    /// Author name
    pub name: String,
    /// Author email
    pub email: String,
    pub body: String,
}

#[cfg(test)]
impl User {
    pub(crate) fn fixture(id: u64) -> Self {
        Self {
            id,
            name: format!("User {}", id),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            address: Address::default(),
            phone: String::new(),
            website: String::new(),
            company: Company::default(),
        }
    }
}

#[cfg(test)]
impl Post {
    pub(crate) fn fixture(id: u64, user_id: u64) -> Self {
        Self {
            id,
            user_id,
            title: format!("Post {}", id),
            body: String::new(),
        }
    }
}

#[cfg(test)]
impl Comment {
    pub(crate) fn fixture(id: u64, post_id: u64) -> Self {
        Self {
            id,
            post_id,
            name: format!("Commenter {}", id),
            email: String::new(),
            body: String::new(),
        }
    }
}

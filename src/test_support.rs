//! Shared fixtures for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, Resource};
use crate::fetcher::{DataSource, FetchResult};
use crate::models::{Comment, Post, User};

/// Scripted upstream response: a collection, or the HTTP status it fails with.
pub type Script<T> = Result<Vec<T>, u16>;

/// In-memory [`DataSource`] whose responses can be swapped between calls.
pub struct ScriptedSource {
    users: Mutex<Script<User>>,
    posts: Mutex<Script<Post>>,
    comments: Mutex<Script<Comment>>,
    posts_delay: Mutex<Duration>,
    user_calls: AtomicUsize,
    post_calls: AtomicUsize,
    comment_calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(users: Script<User>, posts: Script<Post>, comments: Script<Comment>) -> Self {
        Self {
            users: Mutex::new(users),
            posts: Mutex::new(posts),
            comments: Mutex::new(comments),
            posts_delay: Mutex::new(Duration::ZERO),
            user_calls: AtomicUsize::new(0),
            post_calls: AtomicUsize::new(0),
            comment_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_users(&self, script: Script<User>) {
        *self.users.lock().unwrap() = script;
    }

    pub fn set_posts(&self, script: Script<Post>) {
        *self.posts.lock().unwrap() = script;
    }

    /// Makes every posts fetch sleep before answering.
    pub fn set_posts_delay(&self, delay: Duration) {
        *self.posts_delay.lock().unwrap() = delay;
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn post_calls(&self) -> usize {
        self.post_calls.load(Ordering::SeqCst)
    }

    pub fn comment_calls(&self) -> usize {
        self.comment_calls.load(Ordering::SeqCst)
    }
}

fn respond<T: Clone>(script: &Mutex<Script<T>>, resource: Resource) -> FetchResult<T> {
    match &*script.lock().unwrap() {
        Ok(items) => Ok(items.clone()),
        Err(status) => Err(FetchError::Status {
            resource,
            status: *status,
        }),
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn fetch_users(&self) -> FetchResult<User> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        respond(&self.users, Resource::Users)
    }

    async fn fetch_posts(&self) -> FetchResult<Post> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.posts_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        respond(&self.posts, Resource::Posts)
    }

    async fn fetch_comments(&self) -> FetchResult<Comment> {
        self.comment_calls.fetch_add(1, Ordering::SeqCst);
        respond(&self.comments, Resource::Comments)
    }

    async fn fetch_post_comments(&self, post_id: u64) -> FetchResult<Comment> {
        let all = respond(&self.comments, Resource::PostComments(post_id))?;
        Ok(all.into_iter().filter(|c| c.post_id == post_id).collect())
    }
}

pub fn users(ids: &[u64]) -> Vec<User> {
    ids.iter().map(|id| User::fixture(*id)).collect()
}

/// Posts from `(id, user_id)` pairs.
pub fn posts(pairs: &[(u64, u64)]) -> Vec<Post> {
    pairs.iter().map(|(id, uid)| Post::fixture(*id, *uid)).collect()
}

/// One comment per listed post id, with sequential comment ids.
pub fn comments_on(post_ids: &[u64]) -> Vec<Comment> {
    post_ids
        .iter()
        .enumerate()
        .map(|(i, pid)| Comment::fixture(i as u64 + 1, *pid))
        .collect()
}

pub fn user_ids(users: &[User]) -> Vec<u64> {
    users.iter().map(|u| u.id).collect()
}

pub fn post_ids(posts: &[Post]) -> Vec<u64> {
    posts.iter().map(|p| p.id).collect()
}

//! Aggregation Engine
//!
//! Pure derivations over raw collections. Each function is deterministic:
//! identical inputs always produce identical output order.

use std::collections::HashMap;

use crate::models::{Comment, Post, User};

/// Number of users in the top users view
pub const TOP_USERS_LIMIT: usize = 5;

/// Number of posts in the latest posts view
pub const LATEST_POSTS_LIMIT: usize = 5;

// == Top Users ==
/// Returns up to `limit` users ordered by descending post count.
///
/// Users without posts count as zero. Ties keep their order from `users`.
pub fn top_users_by_post_count(users: &[User], posts: &[Post], limit: usize) -> Vec<User> {
    let counts = count_by(posts.iter().map(|post| post.user_id));

    let mut ranked: Vec<(&User, usize)> = users
        .iter()
        .map(|user| (user, counts.get(&user.id).copied().unwrap_or(0)))
        .collect();

    // sort_by is stable, which gives the tie-break
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(user, _)| user.clone())
        .collect()
}

// == Latest Posts ==
/// Returns up to `limit` posts ordered by descending id.
pub fn latest_posts(posts: &[Post], limit: usize) -> Vec<Post> {
    let mut sorted = posts.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted.truncate(limit);
    sorted
}

// == Most Commented Posts ==
/// Returns every post whose comment count equals the maximum, in input order.
///
/// With no posts the result is empty; when no post has comments every post
/// ties at zero and all are returned.
pub fn most_commented_posts(posts: &[Post], comments: &[Comment]) -> Vec<Post> {
    let counts = count_by(comments.iter().map(|comment| comment.post_id));
    let count_of = |post: &Post| counts.get(&post.id).copied().unwrap_or(0);

    let max = posts.iter().map(count_of).max().unwrap_or(0);

    posts
        .iter()
        .filter(|&post| count_of(post) == max)
        .cloned()
        .collect()
}

fn count_by(ids: impl Iterator<Item = u64>) -> HashMap<u64, usize> {
    let mut counts = HashMap::new();
    for id in ids {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

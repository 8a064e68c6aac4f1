//! Shared test harness for list source testing
//!
//! Provides post fixtures with fixed timestamps, a seeding helper, and the
//! pipeline built from the default listing configuration.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod listing_harness;
//! use listing_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod list_source_tests;

use chrono::{DateTime, TimeZone, Utc};
use listable::config::ListingConfig;
use listable::core::entity::{STATUS_DRAFT, STATUS_PUBLISH};
use listable::core::service::EntityStore;
use listable::models::Post;
use listable::pipeline::ListFilterPipeline;

/// Midnight UTC of the given day in January 2024
pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
}

/// A post with deterministic timestamps, ready to be stored
pub fn post(id: i64, title: &str, status: &str) -> Post {
    let mut post = Post::new(title);
    post.id = id;
    post.status = status.to_string();
    post.created_at = day(1);
    post.updated_at = day(1);
    post
}

pub fn published(id: i64, title: &str, published_at: DateTime<Utc>) -> Post {
    let mut post = post(id, title, STATUS_PUBLISH);
    post.published_at = Some(published_at);
    post
}

pub fn draft(id: i64, title: &str) -> Post {
    post(id, title, STATUS_DRAFT)
}

/// The three posts of the listing walkthrough:
/// - A: published 2024-01-02, not pinned
/// - B: published 2024-01-01, pinned 2024-01-01
/// - C: draft whose excerpt mentions "hello"
pub fn walkthrough_posts() -> Vec<Post> {
    let a = published(1, "A", day(2));

    let mut b = published(2, "B", day(1));
    b.top = Some(day(1));

    let mut c = draft(3, "C");
    c.excerpt = "Hello from the drafts".to_string();

    vec![a, b, c]
}

/// Insert every post, keeping the fixture ids
pub async fn seed<S>(store: &S, posts: Vec<Post>)
where
    S: EntityStore<Post>,
{
    for post in posts {
        store.create(post).await.unwrap();
    }
}

/// Pipeline for posts under the built-in configuration
pub fn post_pipeline() -> ListFilterPipeline {
    ListFilterPipeline::from_config(&ListingConfig::default_config(), "post").unwrap()
}

pub fn titles(posts: &[Post]) -> Vec<&str> {
    posts.iter().map(|p| p.title.as_str()).collect()
}

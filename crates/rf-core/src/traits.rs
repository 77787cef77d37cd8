//! # Core Traits (Ports)
//!
//! Any storage backend must implement these traits to be used by the
//! services and the binary.

use crate::error::Result;
use crate::models::{Forum, NewPost, PageQuery, Post, Thread, User};
use async_trait::async_trait;

/// Data persistence contract for posts, including the three thread
/// linearizations.
#[async_trait]
pub trait PostRepo: Send + Sync {
    /// Persists a validated batch atomically, in request order, assigning
    /// each post a fresh id and its materialized path. All posts or none.
    async fn create_posts(&self, posts: &[NewPost]) -> Result<Vec<Post>>;

    async fn get_post(&self, id: i64) -> Result<Post>;

    /// Rewrites the message and raises `isEdited`.
    async fn update_post(&self, id: i64, message: &str) -> Result<Post>;

    /// Chronological order `(created, id)`; cursor excludes ids at or before
    /// (ascending) / at or after (descending) the cursor id.
    async fn thread_posts_flat(&self, thread_id: i64, page: PageQuery) -> Result<Vec<Post>>;

    /// Pre-order over the reply tree via the path sort key; cursor resolves
    /// the cursor post's path and pages strictly past it.
    async fn thread_posts_tree(&self, thread_id: i64, page: PageQuery) -> Result<Vec<Post>>;

    /// Root-chunked pre-order: limit bounds root posts, each root is
    /// returned with its entire subtree. Page size varies.
    async fn thread_posts_parent_tree(&self, thread_id: i64, page: PageQuery) -> Result<Vec<Post>>;
}

/// Thread lookups and creation.
#[async_trait]
pub trait ThreadRepo: Send + Sync {
    async fn create_thread(&self, thread: &Thread) -> Result<Thread>;
    async fn get_thread_by_id(&self, id: i64) -> Result<Thread>;
    async fn get_thread_by_slug(&self, slug: &str) -> Result<Thread>;
}

/// User lookups and profile maintenance.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create_user(&self, user: &User) -> Result<User>;
    async fn get_user(&self, nickname: &str) -> Result<User>;
    async fn update_user(&self, user: &User) -> Result<User>;
}

/// Forum lookups and creation.
#[async_trait]
pub trait ForumRepo: Send + Sync {
    async fn create_forum(&self, forum: &Forum) -> Result<Forum>;
    async fn get_forum(&self, slug: &str) -> Result<Forum>;
}

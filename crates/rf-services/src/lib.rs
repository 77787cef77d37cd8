//! # rf-services
//!
//! The use-case layer of Rusty-Forum: validates requests against the
//! repository ports and drives the store. The post half is the creation
//! coordinator and the sort-mode dispatch over the three thread
//! linearizations; the rest are the thin user/forum/thread collaborators
//! the post operations depend on.

use std::sync::Arc;

use chrono::Utc;
use rf_core::error::{AppError, Result};
use rf_core::models::{
    Forum, NewPost, PageQuery, Post, PostDraft, PostFull, SortMode, Thread, User, UserPatch,
};
use rf_core::traits::{ForumRepo, PostRepo, ThreadRepo, UserRepo};

/// Related entities a post lookup may expand in one call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Related {
    pub user: bool,
    pub forum: bool,
    pub thread: bool,
}

impl Related {
    /// Parses the comma-separated `related` query parameter.
    pub fn parse(raw: &str) -> Related {
        let mut related = Related::default();
        for part in raw.split(',') {
            match part.trim() {
                "user" => related.user = true,
                "forum" => related.forum = true,
                "thread" => related.thread = true,
                _ => {}
            }
        }
        related
    }
}

pub struct ForumService {
    posts: Arc<dyn PostRepo>,
    users: Arc<dyn UserRepo>,
    threads: Arc<dyn ThreadRepo>,
    forums: Arc<dyn ForumRepo>,
}

impl ForumService {
    pub fn new(
        posts: Arc<dyn PostRepo>,
        users: Arc<dyn UserRepo>,
        threads: Arc<dyn ThreadRepo>,
        forums: Arc<dyn ForumRepo>,
    ) -> Self {
        Self { posts, users, threads, forums }
    }

    /// A thread reference is a numeric id when it parses as one, otherwise
    /// a slug. The two misses stay distinct error kinds.
    async fn resolve_thread(&self, slug_or_id: &str) -> Result<Thread> {
        match slug_or_id.parse::<i64>() {
            Ok(id) => self.threads.get_thread_by_id(id).await,
            Err(_) => self.threads.get_thread_by_slug(slug_or_id).await,
        }
    }

    /// Creates a batch of posts under one thread, all-or-nothing.
    ///
    /// Every draft is validated before anything is written; the store then
    /// persists the batch atomically in request order. A draft may not name
    /// an earlier draft of the same batch as parent: parents must already
    /// exist. The whole batch shares a single clock read.
    pub async fn create_posts(&self, drafts: &[PostDraft], slug_or_id: &str) -> Result<Vec<Post>> {
        let thread = self.resolve_thread(slug_or_id).await?;
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let created = Utc::now();
        let mut batch = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match self.users.get_user(&draft.author).await {
                Ok(_) => {}
                Err(AppError::NotFound(..)) => {
                    return Err(AppError::NoAuthorPost(draft.author.clone()))
                }
                Err(err) => return Err(err),
            }

            if draft.parent_id != 0 {
                if let Some(thread_id) = draft.thread_id {
                    if thread_id != thread.id {
                        return Err(AppError::Conflict(format!(
                            "draft names thread {thread_id}, resolved thread is {}",
                            thread.id
                        )));
                    }
                }
                let parent = match self.posts.get_post(draft.parent_id).await {
                    Ok(parent) => parent,
                    Err(AppError::NotFound(..)) => return Err(AppError::OtherThread),
                    Err(err) => return Err(err),
                };
                if parent.thread_id != thread.id {
                    return Err(AppError::OtherThread);
                }
            }

            batch.push(NewPost {
                author: draft.author.clone(),
                forum: thread.forum.clone(),
                thread_id: thread.id,
                message: draft.message.clone(),
                parent_id: draft.parent_id,
                created,
            });
        }

        let posts = self.posts.create_posts(&batch).await?;
        if posts.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(thread = thread.id, count = posts.len(), "created posts");
        Ok(posts)
    }

    /// Serves one page of a thread in the requested linearization.
    pub async fn thread_posts(
        &self,
        slug_or_id: &str,
        sort: SortMode,
        page: PageQuery,
    ) -> Result<Vec<Post>> {
        let thread = self.resolve_thread(slug_or_id).await?;
        match sort {
            SortMode::Flat => self.posts.thread_posts_flat(thread.id, page).await,
            SortMode::Tree => self.posts.thread_posts_tree(thread.id, page).await,
            SortMode::ParentTree => self.posts.thread_posts_parent_tree(thread.id, page).await,
        }
    }

    pub async fn get_post(&self, id: i64) -> Result<Post> {
        self.posts.get_post(id).await
    }

    /// Point lookup with optional expansion of author, forum and thread.
    pub async fn get_post_related(&self, id: i64, related: Related) -> Result<PostFull> {
        let post = self.posts.get_post(id).await?;
        let author = if related.user {
            Some(self.users.get_user(&post.author).await?)
        } else {
            None
        };
        let forum = if related.forum {
            Some(self.forums.get_forum(&post.forum).await?)
        } else {
            None
        };
        let thread = if related.thread {
            Some(self.threads.get_thread_by_id(post.thread_id).await?)
        } else {
            None
        };
        Ok(PostFull { post, author, forum, thread })
    }

    /// An empty message is a no-op: the current post comes back unchanged
    /// and `isEdited` stays as it was.
    pub async fn update_post(&self, id: i64, message: &str) -> Result<Post> {
        if message.is_empty() {
            return self.posts.get_post(id).await;
        }
        self.posts.update_post(id, message).await
    }

    // ── Collaborators: users, forums, threads ───────────────────────────────

    pub async fn create_user(&self, user: &User) -> Result<User> {
        self.users.create_user(user).await
    }

    pub async fn get_user(&self, nickname: &str) -> Result<User> {
        self.users.get_user(nickname).await
    }

    /// Copy-on-update profile edit: only the fields present in the patch
    /// overwrite the stored profile.
    pub async fn update_user(&self, nickname: &str, patch: &UserPatch) -> Result<User> {
        let base = self.users.get_user(nickname).await?;
        self.users.update_user(&base.merged(patch)).await
    }

    pub async fn create_forum(&self, forum: &Forum) -> Result<Forum> {
        // Owner must exist; normalize to the stored nickname.
        let owner = self.users.get_user(&forum.owner).await?;
        self.forums
            .create_forum(&Forum { owner: owner.nickname, ..forum.clone() })
            .await
    }

    pub async fn get_forum(&self, slug: &str) -> Result<Forum> {
        self.forums.get_forum(slug).await
    }

    /// Creates a thread under a forum, denormalizing the forum slug the way
    /// posts later denormalize it from the thread.
    pub async fn create_thread(&self, forum_slug: &str, thread: &Thread) -> Result<Thread> {
        let forum = self.forums.get_forum(forum_slug).await?;
        self.users.get_user(&thread.author).await?;
        self.threads
            .create_thread(&Thread { forum: forum.slug, ..thread.clone() })
            .await
    }

    pub async fn get_thread(&self, slug_or_id: &str) -> Result<Thread> {
        self.resolve_thread(slug_or_id).await
    }
}

//! # rf-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational
//! model and the `rf-core` domain models, including the materialized-path
//! bookkeeping and the three thread linearizations.
//!
//! Paths are stored as a single TEXT sort key (fixed-width hex segments, see
//! `rf_core::path`), so `ORDER BY path` is a pre-order walk of the reply
//! tree and subtree membership is a prefix test on the first segment.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use rf_core::error::{AppError, Result};
use rf_core::models::{Forum, NewPost, PageQuery, Post, Thread, User};
use rf_core::path;
use rf_core::traits::{ForumRepo, PostRepo, ThreadRepo, UserRepo};
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        nickname TEXT PRIMARY KEY,
        fullname TEXT NOT NULL,
        email    TEXT NOT NULL UNIQUE,
        about    TEXT NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS forums (
        slug  TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        owner TEXT NOT NULL REFERENCES users (nickname)
    )",
    "CREATE TABLE IF NOT EXISTS threads (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        slug    TEXT UNIQUE,
        title   TEXT NOT NULL,
        author  TEXT NOT NULL REFERENCES users (nickname),
        forum   TEXT NOT NULL REFERENCES forums (slug),
        message TEXT NOT NULL,
        created TEXT NOT NULL
    )",
    // AUTOINCREMENT keeps post ids monotonic and never reused, which makes
    // an id-based cursor a faithful proxy for creation order.
    "CREATE TABLE IF NOT EXISTS posts (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        thread_id INTEGER NOT NULL REFERENCES threads (id),
        forum     TEXT NOT NULL,
        author    TEXT NOT NULL REFERENCES users (nickname),
        parent_id INTEGER NOT NULL DEFAULT 0,
        message   TEXT NOT NULL,
        is_edited INTEGER NOT NULL DEFAULT 0,
        created   TEXT NOT NULL,
        path      TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_posts_thread_path ON posts (thread_id, path)",
    "CREATE INDEX IF NOT EXISTS idx_posts_thread_created ON posts (thread_id, created, id)",
    "CREATE INDEX IF NOT EXISTS idx_posts_thread_roots ON posts (thread_id, id) WHERE parent_id = 0",
];

const POST_COLUMNS: &str =
    "id, author, forum, thread_id, message, parent_id, is_edited, created, path";

pub struct SqliteForumRepo {
    pool: SqlitePool,
}

impl SqliteForumRepo {
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(db_err)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // A :memory: database exists per connection, so the pool must stay
        // at a single connection or each request would see its own (empty)
        // schema.
        let max_connections = if url.contains(":memory:") { 1 } else { 8 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(db_err)?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        }
        tracing::debug!("schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Maps driver errors onto the domain vocabulary. Referential failures at
/// persistence time are races lost after validation; they surface as
/// `ConstraintViolation` and are never retried here.
fn db_err(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::ForeignKeyViolation => AppError::ConstraintViolation(db.message().to_string()),
            ErrorKind::UniqueViolation => AppError::AlreadyExists(db.message().to_string()),
            _ => AppError::Internal(err.to_string()),
        },
        _ => AppError::Internal(err.to_string()),
    }
}

fn post_from_row(row: &SqliteRow) -> Post {
    let key: String = row.get("path");
    Post {
        id: row.get("id"),
        author: row.get("author"),
        forum: row.get("forum"),
        thread_id: row.get("thread_id"),
        message: row.get("message"),
        parent_id: row.get("parent_id"),
        is_edited: row.get("is_edited"),
        created: row.get("created"),
        path: path::decode(&key),
    }
}

fn thread_from_row(row: &SqliteRow) -> Thread {
    Thread {
        id: row.get("id"),
        slug: row.get("slug"),
        title: row.get("title"),
        author: row.get("author"),
        forum: row.get("forum"),
        message: row.get("message"),
        created: row.get("created"),
    }
}

/// SQLite treats a negative LIMIT as "no limit"; the domain uses 0 for that.
fn limit_or_all(limit: i64) -> i64 {
    if limit > 0 {
        limit
    } else {
        -1
    }
}

#[async_trait]
impl PostRepo for SqliteForumRepo {
    /// Persists the whole batch inside one transaction: ids are reserved by
    /// the insert, the path is derived from the (already committed or
    /// same-batch) parent and written before commit, so a partially
    /// assigned path is never observable and a failure leaves nothing
    /// behind.
    async fn create_posts(&self, posts: &[NewPost]) -> Result<Vec<Post>> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let mut created = Vec::with_capacity(posts.len());

        for new_post in posts {
            let parent_path = if new_post.parent_id != 0 {
                let row = sqlx::query("SELECT path FROM posts WHERE id = ? AND thread_id = ?")
                    .bind(new_post.parent_id)
                    .bind(new_post.thread_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(db_err)?;
                match row {
                    Some(row) => Some(path::decode(&row.get::<String, _>("path"))),
                    // Parent vanished or never was in this thread.
                    None => return Err(AppError::OtherThread),
                }
            } else {
                None
            };

            let id: i64 = sqlx::query_scalar(
                "INSERT INTO posts (thread_id, forum, author, parent_id, message, created, path)
                 VALUES (?, ?, ?, ?, ?, ?, '') RETURNING id",
            )
            .bind(new_post.thread_id)
            .bind(&new_post.forum)
            .bind(&new_post.author)
            .bind(new_post.parent_id)
            .bind(&new_post.message)
            .bind(new_post.created)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;

            let full_path = path::assign(parent_path.as_deref(), id);
            sqlx::query("UPDATE posts SET path = ? WHERE id = ?")
                .bind(path::encode(&full_path))
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;

            created.push(Post {
                id,
                author: new_post.author.clone(),
                forum: new_post.forum.clone(),
                thread_id: new_post.thread_id,
                message: new_post.message.clone(),
                parent_id: new_post.parent_id,
                is_edited: false,
                created: new_post.created,
                path: full_path,
            });
        }

        tx.commit().await.map_err(db_err)?;
        Ok(created)
    }

    async fn get_post(&self, id: i64) -> Result<Post> {
        let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|row| post_from_row(&row))
            .ok_or_else(|| AppError::NotFound("post".into(), id.to_string()))
    }

    async fn update_post(&self, id: i64, message: &str) -> Result<Post> {
        let row = sqlx::query(&format!(
            "UPDATE posts SET message = ?, is_edited = 1 WHERE id = ? RETURNING {POST_COLUMNS}"
        ))
        .bind(message)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|row| post_from_row(&row))
            .ok_or_else(|| AppError::NotFound("post".into(), id.to_string()))
    }

    async fn thread_posts_flat(&self, thread_id: i64, page: PageQuery) -> Result<Vec<Post>> {
        let mut sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE thread_id = ?");
        if page.since.is_some() {
            sql.push_str(if page.desc { " AND id < ?" } else { " AND id > ?" });
        }
        sql.push_str(if page.desc {
            " ORDER BY created DESC, id DESC"
        } else {
            " ORDER BY created, id"
        });
        sql.push_str(" LIMIT ?");

        let mut query = sqlx::query(&sql).bind(thread_id);
        if let Some(since) = page.since {
            query = query.bind(since);
        }
        let rows = query
            .bind(limit_or_all(page.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    async fn thread_posts_tree(&self, thread_id: i64, page: PageQuery) -> Result<Vec<Post>> {
        let mut sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE thread_id = ?");
        // A cursor that resolves to no post compares against NULL and yields
        // an empty page.
        if page.since.is_some() {
            sql.push_str(if page.desc {
                " AND path < (SELECT path FROM posts WHERE id = ?)"
            } else {
                " AND path > (SELECT path FROM posts WHERE id = ?)"
            });
        }
        sql.push_str(if page.desc {
            " ORDER BY path DESC"
        } else {
            " ORDER BY path"
        });
        sql.push_str(" LIMIT ?");

        let mut query = sqlx::query(&sql).bind(thread_id);
        if let Some(since) = page.since {
            query = query.bind(since);
        }
        let rows = query
            .bind(limit_or_all(page.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(post_from_row).collect())
    }

    /// The pagination unit here is the root post: `limit` bounds how many
    /// roots are selected and every selected root brings its entire subtree,
    /// so the page size varies. The outer direction reverses root order
    /// only; children always render top-down under their parent.
    async fn thread_posts_parent_tree(&self, thread_id: i64, page: PageQuery) -> Result<Vec<Post>> {
        let root_bound = match page.since {
            Some(since) => {
                let row = sqlx::query("SELECT path FROM posts WHERE id = ?")
                    .bind(since)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(db_err)?;
                match row {
                    // Bound the root selection by the cursor post's own root.
                    Some(row) => path::decode(&row.get::<String, _>("path")).first().copied(),
                    None => return Ok(Vec::new()),
                }
            }
            None => None,
        };

        let mut sql = String::from("SELECT id FROM posts WHERE thread_id = ? AND parent_id = 0");
        if root_bound.is_some() {
            sql.push_str(if page.desc { " AND id < ?" } else { " AND id > ?" });
        }
        sql.push_str(if page.desc { " ORDER BY id DESC" } else { " ORDER BY id" });
        sql.push_str(" LIMIT ?");

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(thread_id);
        if let Some(bound) = root_bound {
            query = query.bind(bound);
        }
        let roots = query
            .bind(limit_or_all(page.limit))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        if roots.is_empty() {
            return Ok(Vec::new());
        }

        // Subtree membership is a match on the first fixed-width segment of
        // the path key; within a root the plain key order is pre-order.
        let placeholders = vec!["?"; roots.len()].join(", ");
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE thread_id = ? AND substr(path, 1, {width}) IN ({placeholders})
             ORDER BY substr(path, 1, {width}) {root_dir}, path",
            width = path::SEGMENT_WIDTH,
            root_dir = if page.desc { "DESC" } else { "ASC" },
        );
        let mut query = sqlx::query(&sql).bind(thread_id);
        for root in &roots {
            query = query.bind(path::segment(*root));
        }
        let rows = query.fetch_all(&self.pool).await.map_err(db_err)?;
        Ok(rows.iter().map(post_from_row).collect())
    }
}

#[async_trait]
impl ThreadRepo for SqliteForumRepo {
    async fn create_thread(&self, thread: &Thread) -> Result<Thread> {
        let row = sqlx::query(
            "INSERT INTO threads (slug, title, author, forum, message, created)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, slug, title, author, forum, message, created",
        )
        .bind(&thread.slug)
        .bind(&thread.title)
        .bind(&thread.author)
        .bind(&thread.forum)
        .bind(&thread.message)
        .bind(thread.created)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(thread_from_row(&row))
    }

    async fn get_thread_by_id(&self, id: i64) -> Result<Thread> {
        let row = sqlx::query("SELECT * FROM threads WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|row| thread_from_row(&row))
            .ok_or(AppError::ThreadNotFoundById(id))
    }

    async fn get_thread_by_slug(&self, slug: &str) -> Result<Thread> {
        let row = sqlx::query("SELECT * FROM threads WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|row| thread_from_row(&row))
            .ok_or_else(|| AppError::ThreadNotFoundBySlug(slug.to_string()))
    }
}

#[async_trait]
impl UserRepo for SqliteForumRepo {
    async fn create_user(&self, user: &User) -> Result<User> {
        sqlx::query("INSERT INTO users (nickname, fullname, email, about) VALUES (?, ?, ?, ?)")
            .bind(&user.nickname)
            .bind(&user.fullname)
            .bind(&user.email)
            .bind(&user.about)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(user.clone())
    }

    async fn get_user(&self, nickname: &str) -> Result<User> {
        let row = sqlx::query("SELECT nickname, fullname, email, about FROM users WHERE nickname = ?")
            .bind(nickname)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|row| User {
            nickname: row.get("nickname"),
            fullname: row.get("fullname"),
            email: row.get("email"),
            about: row.get("about"),
        })
        .ok_or_else(|| AppError::NotFound("user".into(), nickname.to_string()))
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let result = sqlx::query("UPDATE users SET fullname = ?, email = ?, about = ? WHERE nickname = ?")
            .bind(&user.fullname)
            .bind(&user.email)
            .bind(&user.about)
            .bind(&user.nickname)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("user".into(), user.nickname.clone()));
        }
        Ok(user.clone())
    }
}

#[async_trait]
impl ForumRepo for SqliteForumRepo {
    async fn create_forum(&self, forum: &Forum) -> Result<Forum> {
        sqlx::query("INSERT INTO forums (slug, title, owner) VALUES (?, ?, ?)")
            .bind(&forum.slug)
            .bind(&forum.title)
            .bind(&forum.owner)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(forum.clone())
    }

    async fn get_forum(&self, slug: &str) -> Result<Forum> {
        let row = sqlx::query("SELECT slug, title, owner FROM forums WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.map(|row| Forum {
            slug: row.get("slug"),
            title: row.get("title"),
            owner: row.get("owner"),
        })
        .ok_or_else(|| AppError::NotFound("forum".into(), slug.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn seeded_repo() -> (SqliteForumRepo, Thread) {
        let repo = SqliteForumRepo::new("sqlite::memory:").await.unwrap();
        repo.create_user(&User {
            nickname: "ada".into(),
            fullname: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            about: String::new(),
        })
        .await
        .unwrap();
        repo.create_forum(&Forum {
            slug: "general".into(),
            title: "General".into(),
            owner: "ada".into(),
        })
        .await
        .unwrap();
        let thread = repo
            .create_thread(&Thread {
                id: 0,
                slug: Some("first".into()),
                title: "First".into(),
                author: "ada".into(),
                forum: "general".into(),
                message: "op".into(),
                created: Utc::now(),
            })
            .await
            .unwrap();
        (repo, thread)
    }

    fn draft(thread: &Thread, parent_id: i64) -> NewPost {
        NewPost {
            author: "ada".into(),
            forum: thread.forum.clone(),
            thread_id: thread.id,
            message: "msg".into(),
            parent_id,
            created: Utc::now(),
        }
    }

    /// Two roots with one reply each: 1(root) <- 2, 3(root) <- 4.
    async fn example_tree(repo: &SqliteForumRepo, thread: &Thread) -> Vec<i64> {
        let mut ids = Vec::new();
        for parent in [0, 0] {
            let created = repo.create_posts(&[draft(thread, parent)]).await.unwrap();
            ids.push(created[0].id);
        }
        // reply to each root
        let reply_a = repo.create_posts(&[draft(thread, ids[0])]).await.unwrap()[0].id;
        let reply_b = repo.create_posts(&[draft(thread, ids[1])]).await.unwrap()[0].id;
        vec![ids[0], reply_a, ids[1], reply_b]
    }

    #[tokio::test]
    async fn paths_extend_parent_paths() {
        let (repo, thread) = seeded_repo().await;
        let roots = repo
            .create_posts(&[draft(&thread, 0), draft(&thread, 0)])
            .await
            .unwrap();
        let reply = repo
            .create_posts(&[draft(&thread, roots[0].id)])
            .await
            .unwrap();

        assert_eq!(roots[0].path, vec![roots[0].id]);
        assert_eq!(roots[1].path, vec![roots[1].id]);
        assert_eq!(reply[0].path, vec![roots[0].id, reply[0].id]);

        let fetched = repo.get_post(reply[0].id).await.unwrap();
        assert_eq!(fetched.path, reply[0].path);
        assert_eq!(fetched.parent_id, roots[0].id);
    }

    #[tokio::test]
    async fn tree_order_is_preorder() {
        let (repo, thread) = seeded_repo().await;
        let tree = example_tree(&repo, &thread).await;
        let (r1, a, r2, b) = (tree[0], tree[1], tree[2], tree[3]);

        let page = PageQuery { limit: 0, since: None, desc: false };
        let posts = repo.thread_posts_tree(thread.id, page).await.unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![r1, a, r2, b]);

        let desc = repo
            .thread_posts_tree(thread.id, PageQuery { limit: 0, since: None, desc: true })
            .await
            .unwrap();
        let ids: Vec<i64> = desc.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b, r2, a, r1]);
    }

    #[tokio::test]
    async fn flat_pages_never_repeat_or_skip() {
        let (repo, thread) = seeded_repo().await;
        example_tree(&repo, &thread).await;

        let all = repo
            .thread_posts_flat(thread.id, PageQuery { limit: 0, since: None, desc: false })
            .await
            .unwrap();
        assert_eq!(all.len(), 4);

        let mut paged = Vec::new();
        let mut since = None;
        loop {
            let page = repo
                .thread_posts_flat(thread.id, PageQuery { limit: 2, since, desc: false })
                .await
                .unwrap();
            if page.is_empty() {
                break;
            }
            since = Some(page.last().unwrap().id);
            paged.extend(page);
        }
        let all_ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        let paged_ids: Vec<i64> = paged.iter().map(|p| p.id).collect();
        assert_eq!(paged_ids, all_ids);
    }

    #[tokio::test]
    async fn parent_tree_limit_bounds_roots_not_posts() {
        let (repo, thread) = seeded_repo().await;
        // R1 with two replies (3 posts incl. itself), R2 with one reply.
        let r1 = repo.create_posts(&[draft(&thread, 0)]).await.unwrap()[0].id;
        repo.create_posts(&[draft(&thread, r1), draft(&thread, r1)])
            .await
            .unwrap();
        let r2 = repo.create_posts(&[draft(&thread, 0)]).await.unwrap()[0].id;
        repo.create_posts(&[draft(&thread, r2)]).await.unwrap();

        let page = repo
            .thread_posts_parent_tree(thread.id, PageQuery { limit: 2, since: None, desc: false })
            .await
            .unwrap();
        // Two roots selected, five posts returned.
        assert_eq!(page.len(), 5);

        let one_root = repo
            .thread_posts_parent_tree(thread.id, PageQuery { limit: 1, since: None, desc: false })
            .await
            .unwrap();
        assert_eq!(one_root.len(), 3);
        assert!(one_root.iter().all(|p| p.path[0] == r1));
    }

    #[tokio::test]
    async fn parent_tree_desc_keeps_children_top_down() {
        let (repo, thread) = seeded_repo().await;
        let tree = example_tree(&repo, &thread).await;
        let (r1, a, r2, b) = (tree[0], tree[1], tree[2], tree[3]);

        let page = repo
            .thread_posts_parent_tree(thread.id, PageQuery { limit: 0, since: None, desc: true })
            .await
            .unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        // Root order reversed, subtrees still parent-first.
        assert_eq!(ids, vec![r2, b, r1, a]);
    }

    #[tokio::test]
    async fn parent_tree_cursor_resolves_to_root() {
        let (repo, thread) = seeded_repo().await;
        let tree = example_tree(&repo, &thread).await;
        let (a, r2, b) = (tree[1], tree[2], tree[3]);

        // Cursor on a non-root post bounds by that post's root.
        let page = repo
            .thread_posts_parent_tree(
                thread.id,
                PageQuery { limit: 0, since: Some(a), desc: false },
            )
            .await
            .unwrap();
        let ids: Vec<i64> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![r2, b]);

        // Unresolvable cursor: empty page, not an error.
        let none = repo
            .thread_posts_parent_tree(
                thread.id,
                PageQuery { limit: 0, since: Some(9999), desc: false },
            )
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_post_raises_edit_flag() {
        let (repo, thread) = seeded_repo().await;
        let post = repo.create_posts(&[draft(&thread, 0)]).await.unwrap().remove(0);
        assert!(!post.is_edited);

        let updated = repo.update_post(post.id, "rewritten").await.unwrap();
        assert!(updated.is_edited);
        assert_eq!(updated.message, "rewritten");
        assert_eq!(updated.path, post.path);
    }

    #[tokio::test]
    async fn unknown_author_is_a_constraint_violation() {
        let (repo, thread) = seeded_repo().await;
        let mut bad = draft(&thread, 0);
        bad.author = "nobody".into();
        let err = repo.create_posts(&[bad]).await.unwrap_err();
        assert!(matches!(err, AppError::ConstraintViolation(_)));

        // Nothing from the failed batch is visible.
        let all = repo
            .thread_posts_flat(thread.id, PageQuery::default())
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn failed_batch_leaves_no_partial_writes() {
        let (repo, thread) = seeded_repo().await;
        let mut bad = draft(&thread, 0);
        bad.author = "nobody".into();
        // First draft is fine, second fails: the whole batch must roll back.
        let err = repo.create_posts(&[draft(&thread, 0), bad]).await.unwrap_err();
        assert!(matches!(err, AppError::ConstraintViolation(_)));
        let all = repo
            .thread_posts_flat(thread.id, PageQuery::default())
            .await
            .unwrap();
        assert!(all.is_empty());
    }
}

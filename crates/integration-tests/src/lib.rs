//! Shared fixtures for the workspace-level tests.

use std::sync::Arc;

use chrono::Utc;
use rf_core::models::{Forum, PostDraft, Thread, User};
use rf_db_sqlite::SqliteForumRepo;
use rf_services::ForumService;

pub const THREAD_SLUG: &str = "fixture-thread";

/// An in-memory forum with one user, one forum and one empty thread.
pub async fn seeded_service() -> Arc<ForumService> {
    let repo = Arc::new(SqliteForumRepo::new("sqlite::memory:").await.unwrap());
    let svc = ForumService::new(repo.clone(), repo.clone(), repo.clone(), repo);

    svc.create_user(&User {
        nickname: "ada".into(),
        fullname: "Ada Lovelace".into(),
        email: "ada@example.org".into(),
        about: String::new(),
    })
    .await
    .unwrap();
    svc.create_forum(&Forum {
        slug: "general".into(),
        title: "General".into(),
        owner: "ada".into(),
    })
    .await
    .unwrap();
    svc.create_thread(
        "general",
        &Thread {
            id: 0,
            slug: Some(THREAD_SLUG.into()),
            title: "Fixture".into(),
            author: "ada".into(),
            forum: String::new(),
            message: "op".into(),
            created: Utc::now(),
        },
    )
    .await
    .unwrap();

    Arc::new(svc)
}

pub fn draft(parent_id: i64, message: &str) -> PostDraft {
    PostDraft {
        author: "ada".into(),
        message: message.into(),
        parent_id,
        thread_id: None,
    }
}

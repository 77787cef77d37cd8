//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Forum.
//! Identifiers are store-assigned `i64` serials: monotonically increasing,
//! never reused, so an id-based cursor is a safe proxy for creation order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered participant, addressed by nickname everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub about: String,
}

/// Sparse profile patch: only the provided fields overwrite the base value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub about: Option<String>,
}

impl User {
    /// Explicit copy-on-update merge: fields absent from the patch keep
    /// their current value.
    pub fn merged(&self, patch: &UserPatch) -> User {
        User {
            nickname: self.nickname.clone(),
            fullname: patch.fullname.clone().unwrap_or_else(|| self.fullname.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            about: patch.about.clone().unwrap_or_else(|| self.about.clone()),
        }
    }
}

/// A forum groups threads under a URL slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forum {
    pub slug: String,
    pub title: String,
    #[serde(rename = "user")]
    pub owner: String,
}

/// A Thread contains a tree of Posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub forum: String,
    pub message: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

/// The fundamental unit of conversation.
///
/// `path` is the materialized ancestry: every ancestor id from the root of
/// the reply tree down to (and including) `id` itself. It is assigned once
/// at insert time and never mutated; all tree-ordered reads sort by it
/// instead of walking parent pointers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author: String,
    pub forum: String,
    #[serde(rename = "thread")]
    pub thread_id: i64,
    pub message: String,
    /// 0 for a root post, otherwise the id of a post in the same thread.
    #[serde(rename = "parent", default)]
    pub parent_id: i64,
    #[serde(rename = "isEdited")]
    pub is_edited: bool,
    pub created: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub path: Vec<i64>,
}

/// An unpersisted proposed post, as bound from a creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub author: String,
    pub message: String,
    #[serde(rename = "parent", default)]
    pub parent_id: i64,
    /// Optional explicit thread id; must match the resolved thread if set.
    #[serde(rename = "thread", default)]
    pub thread_id: Option<i64>,
}

/// A validated draft, stamped and ready for the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: String,
    pub forum: String,
    pub thread_id: i64,
    pub message: String,
    pub parent_id: i64,
    pub created: DateTime<Utc>,
}

/// A post together with its optionally expanded relations.
#[derive(Debug, Clone, Serialize)]
pub struct PostFull {
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<Forum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

/// The three linearizations a thread's post tree can be served in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Flat,
    Tree,
    ParentTree,
}

impl SortMode {
    /// Unrecognized mode strings fall back to flat.
    pub fn parse(s: &str) -> SortMode {
        match s {
            "tree" => SortMode::Tree,
            "parent_tree" => SortMode::ParentTree,
            _ => SortMode::Flat,
        }
    }
}

/// Cursor-based page request for thread posts.
///
/// `limit == 0` means unbounded. In `ParentTree` mode the limit bounds the
/// number of ROOT posts, not the number of returned items; the page size is
/// the sum of the selected subtree sizes. Callers rely on that contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery {
    pub limit: i64,
    /// Id of the last-seen post from the previous page, if any.
    pub since: Option<i64>,
    pub desc: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unpatched_fields() {
        let base = User {
            nickname: "ada".into(),
            fullname: "Ada Lovelace".into(),
            email: "ada@example.org".into(),
            about: "first".into(),
        };
        let merged = base.merged(&UserPatch {
            email: Some("ada@analytical.engine".into()),
            ..UserPatch::default()
        });
        assert_eq!(merged.fullname, "Ada Lovelace");
        assert_eq!(merged.email, "ada@analytical.engine");
        assert_eq!(merged.about, "first");
    }

    #[test]
    fn empty_patch_is_identity() {
        let base = User {
            nickname: "bob".into(),
            fullname: "Bob".into(),
            email: "bob@example.org".into(),
            about: String::new(),
        };
        let merged = base.merged(&UserPatch::default());
        assert_eq!(merged.fullname, base.fullname);
        assert_eq!(merged.email, base.email);
    }

    #[test]
    fn sort_mode_defaults_to_flat() {
        assert_eq!(SortMode::parse("tree"), SortMode::Tree);
        assert_eq!(SortMode::parse("parent_tree"), SortMode::ParentTree);
        assert_eq!(SortMode::parse("flat"), SortMode::Flat);
        assert_eq!(SortMode::parse("newest"), SortMode::Flat);
        assert_eq!(SortMode::parse(""), SortMode::Flat);
    }

    #[test]
    fn draft_binds_wire_names() {
        let draft: PostDraft =
            serde_json::from_str(r#"{"author":"ada","message":"hi","parent":3}"#).unwrap();
        assert_eq!(draft.parent_id, 3);
        assert_eq!(draft.thread_id, None);
    }
}

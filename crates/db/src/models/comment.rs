//! Comment entity model, DTOs, and thread projections.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full comment row from the `comments` table.
///
/// `author_id` and `post_id` are immutable after creation; `parent_id`
/// links a reply to its top-level comment on the same post.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub post_id: DbId,
    pub parent_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Record for inserting a new comment. Content is already trimmed and
/// validated; `status` is the moderation default.
#[derive(Debug)]
pub struct CreateComment {
    pub content: String,
    pub author_id: DbId,
    pub post_id: DbId,
    pub parent_id: Option<DbId>,
    pub status: String,
}

/// A comment row joined with its author's display data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub post_id: DbId,
    pub parent_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_username: String,
    pub author_full_name: Option<String>,
    pub author_avatar_url: Option<String>,
}

/// A top-level comment with its approved replies, both ordered oldest
/// first. The full thread for a post is materialized in one read.
#[derive(Debug, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: CommentWithAuthor,
    pub replies: Vec<CommentWithAuthor>,
}

/// A comment as shown on the dashboard moderation list: any status, joined
/// with its author and the owning post's title and slug.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardComment {
    pub id: DbId,
    pub content: String,
    pub author_id: DbId,
    pub post_id: DbId,
    pub parent_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author_username: String,
    pub author_full_name: Option<String>,
    pub author_avatar_url: Option<String>,
    pub post_title: String,
    pub post_slug: String,
}

/// Comment counters for the dashboard stats widget.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentCounts {
    pub total: i64,
    pub pending: i64,
}

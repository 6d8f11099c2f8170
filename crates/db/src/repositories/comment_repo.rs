//! Repository for the `comments` table.
//!
//! Read paths are status-gated: the public thread and the approved count
//! only ever see `approved` rows. The dashboard list is the one read that
//! crosses statuses, scoped to posts owned by the caller.

use std::collections::HashMap;

use quill_core::comments::STATUS_APPROVED;
use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{
    Comment, CommentCounts, CommentThread, CommentWithAuthor, CreateComment, DashboardComment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, content, author_id, post_id, parent_id, status, created_at, updated_at";

/// Comment columns joined with author display data, for thread reads.
const AUTHOR_COLUMNS: &str = "\
    c.id, c.content, c.author_id, c.post_id, c.parent_id, c.status, \
    c.created_at, c.updated_at, \
    u.username AS author_username, p.full_name AS author_full_name, \
    p.avatar_url AS author_avatar_url";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (content, author_id, post_id, parent_id, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(&input.content)
            .bind(input.author_id)
            .bind(input.post_id)
            .bind(input.parent_id)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Materialize the full approved thread for a post.
    ///
    /// Top-level comments come back ordered by `created_at` ascending, each
    /// carrying its author's display data and its approved replies in the
    /// same order. Replies are fetched in one query for the whole post and
    /// grouped in memory. Pure read, restartable.
    pub async fn list_thread(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<CommentThread>, sqlx::Error> {
        let query = format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM comments c
             JOIN users u ON u.id = c.author_id
             LEFT JOIN profiles p ON p.user_id = c.author_id
             WHERE c.post_id = $1 AND c.status = $2 AND c.parent_id IS NULL
             ORDER BY c.created_at ASC"
        );
        let top_level = sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(post_id)
            .bind(STATUS_APPROVED)
            .fetch_all(pool)
            .await?;

        let query = format!(
            "SELECT {AUTHOR_COLUMNS}
             FROM comments c
             JOIN users u ON u.id = c.author_id
             LEFT JOIN profiles p ON p.user_id = c.author_id
             WHERE c.post_id = $1 AND c.status = $2 AND c.parent_id IS NOT NULL
             ORDER BY c.created_at ASC"
        );
        let replies = sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(post_id)
            .bind(STATUS_APPROVED)
            .fetch_all(pool)
            .await?;

        let mut by_parent: HashMap<DbId, Vec<CommentWithAuthor>> = HashMap::new();
        for reply in replies {
            if let Some(parent_id) = reply.parent_id {
                by_parent.entry(parent_id).or_default().push(reply);
            }
        }

        Ok(top_level
            .into_iter()
            .map(|comment| {
                let replies = by_parent.remove(&comment.id).unwrap_or_default();
                CommentThread { comment, replies }
            })
            .collect())
    }

    /// Count the approved comments on a post.
    ///
    /// Unknown post ids yield `0`, not an error.
    pub async fn count_approved(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE post_id = $1 AND status = $2",
        )
        .bind(post_id)
        .bind(STATUS_APPROVED)
        .fetch_one(pool)
        .await
    }

    /// Set a comment's moderation status.
    ///
    /// Returns `None` if no row with the given `id` exists. Re-applying the
    /// current status is a no-op beyond the `updated_at` bump.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a comment. Replies cascade at the schema level.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every comment (any status) on posts authored by `author_id`,
    /// newest first, with comment author and post context for the
    /// dashboard moderation list.
    pub async fn list_for_author_posts(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<Vec<DashboardComment>, sqlx::Error> {
        sqlx::query_as::<_, DashboardComment>(
            "SELECT c.id, c.content, c.author_id, c.post_id, c.parent_id, c.status,
                    c.created_at, c.updated_at,
                    u.username AS author_username, p.full_name AS author_full_name,
                    p.avatar_url AS author_avatar_url,
                    po.title AS post_title, po.slug AS post_slug
             FROM comments c
             JOIN posts po ON po.id = c.post_id
             JOIN users u ON u.id = c.author_id
             LEFT JOIN profiles p ON p.user_id = c.author_id
             WHERE po.author_id = $1
             ORDER BY c.created_at DESC",
        )
        .bind(author_id)
        .fetch_all(pool)
        .await
    }

    /// Comment counters (total and pending) across an author's posts.
    pub async fn counts_for_author_posts(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<CommentCounts, sqlx::Error> {
        sqlx::query_as::<_, CommentCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE c.status = 'pending') AS pending
             FROM comments c
             JOIN posts po ON po.id = c.post_id
             WHERE po.author_id = $1",
        )
        .bind(author_id)
        .fetch_one(pool)
        .await
    }
}

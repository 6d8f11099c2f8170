//! Repository for the `tags` and `post_tags` tables.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::Tag;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, created_at";

/// Provides CRUD operations for tags and post-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag or return the existing one if the name is already taken.
    ///
    /// Uses `ON CONFLICT` for idempotent creation so the post editor can
    /// submit tag names without checking existence first.
    pub async fn create_or_get(
        pool: &PgPool,
        name: &str,
        slug: &str,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, slug)
             VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    /// List all tags ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// List the tags attached to a post, ordered by name.
    pub async fn list_for_post(pool: &PgPool, post_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.slug, t.created_at
             FROM tags t
             JOIN post_tags pt ON pt.tag_id = t.id
             WHERE pt.post_id = $1
             ORDER BY t.name",
        )
            .bind(post_id)
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `posts` table and the `post_tags` junction.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostCounts, PostListFilter, UpdatePost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, excerpt, featured_image, status, \
                        author_id, category_id, published_at, created_at, updated_at";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (title, slug, content, excerpt, featured_image, status,
                                author_id, category_id, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.featured_image)
            .bind(&input.status)
            .bind(input.author_id)
            .bind(input.category_id)
            .bind(input.published_at)
            .fetch_one(pool)
            .await
    }

    /// Find a post by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE slug = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a slug to the post's internal id.
    ///
    /// `None` is an expected outcome (e.g. a comment fetch for a slug with
    /// no matching post) and is never escalated to an error by callers.
    pub async fn resolve_id_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List posts matching the filter, newest published first.
    pub async fn list(pool: &PgPool, filter: &PostListFilter) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE status = $1
               AND ($2::bigint IS NULL OR category_id = $2)
               AND ($3::bigint IS NULL OR author_id = $3)
               AND ($4::bigint IS NULL OR id IN
                    (SELECT post_id FROM post_tags WHERE tag_id = $4))
             ORDER BY published_at DESC NULLS LAST, created_at DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(&filter.status)
            .bind(filter.category_id)
            .bind(filter.author_id)
            .bind(filter.tag_id)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// List all of an author's posts regardless of status, newest first.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts WHERE author_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Update a post. `COALESCE`d fields keep their value when `None`;
    /// `category_id` and `published_at` are always written since clearing
    /// them is meaningful.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                excerpt = COALESCE($5, excerpt),
                featured_image = COALESCE($6, featured_image),
                status = COALESCE($7, status),
                category_id = $8,
                published_at = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.featured_image)
            .bind(&input.status)
            .bind(input.category_id)
            .bind(input.published_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Comments and tag links cascade at the schema level.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the post's tag set with `tag_ids`.
    pub async fn set_tags(
        pool: &PgPool,
        post_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO post_tags (post_id, tag_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(post_id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Post counters for an author's dashboard.
    pub async fn counts_for_author(
        pool: &PgPool,
        author_id: DbId,
    ) -> Result<PostCounts, sqlx::Error> {
        sqlx::query_as::<_, PostCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'published') AS published,
                    COUNT(*) FILTER (WHERE status = 'draft') AS draft
             FROM posts
             WHERE author_id = $1",
        )
        .bind(author_id)
        .fetch_one(pool)
        .await
    }
}

//! Repository for the `images` table.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{CreateImage, Image};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, file_name, storage_path, content_type, \
                        size_bytes, width, height, created_at";

/// Provides CRUD operations for uploaded images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a record for a newly stored file, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (owner_id, file_name, storage_path, content_type,
                                 size_bytes, width, height)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(input.owner_id)
            .bind(&input.file_name)
            .bind(&input.storage_path)
            .bind(&input.content_type)
            .bind(input.size_bytes)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }

    /// Find an image by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's images, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an image record. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

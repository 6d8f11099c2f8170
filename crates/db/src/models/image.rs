//! Uploaded image model and DTOs.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `images` table, one per stored file.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub owner_id: DbId,
    pub file_name: String,
    /// Path relative to the upload root, `<owner_id>/<file_name>`.
    pub storage_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
}

/// Record for inserting a newly stored image.
#[derive(Debug)]
pub struct CreateImage {
    pub owner_id: DbId,
    pub file_name: String,
    pub storage_path: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

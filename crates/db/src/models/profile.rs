//! Author profile model and DTOs.

use quill_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table, keyed by the owning user's id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display data joined onto posts and comments for rendering.
/// Never mutated by the read paths that resolve it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthorProfile {
    pub user_id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
}

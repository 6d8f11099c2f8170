//! Repository for the `profiles` table.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{AuthorProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, full_name, avatar_url, bio, website, created_at, updated_at";

/// Provides CRUD operations for author profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert the profile row for a freshly created user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        full_name: Option<&str>,
    ) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (user_id, full_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(full_name)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by the owning user's id.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no profile row exists for `user_id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                avatar_url = COALESCE($3, avatar_url),
                bio = COALESCE($4, bio),
                website = COALESCE($5, website)
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.avatar_url)
            .bind(&input.bio)
            .bind(&input.website)
            .fetch_optional(pool)
            .await
    }

    /// Resolve the display data joined onto posts and comments.
    pub async fn author_profile(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AuthorProfile>, sqlx::Error> {
        sqlx::query_as::<_, AuthorProfile>(
            "SELECT u.id AS user_id, u.username, p.full_name, p.avatar_url
             FROM users u
             LEFT JOIN profiles p ON p.user_id = u.id
             WHERE u.id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}

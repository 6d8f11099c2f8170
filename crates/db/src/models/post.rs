//! Post entity model, DTOs, and enriched read projections.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::category::Category;
use crate::models::profile::AuthorProfile;
use crate::models::tag::Tag;

/// Full post row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub author_id: DbId,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Record for inserting a new post. Slug, excerpt, and `published_at` are
/// derived by the caller before insertion.
#[derive(Debug)]
pub struct CreatePost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub status: String,
    pub author_id: DbId,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
}

/// Record for updating an existing post. Only non-`None` fields are applied;
/// `category_id` and `published_at` are always written since "no category"
/// and "not published" are meaningful values.
#[derive(Debug)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub published_at: Option<Timestamp>,
}

/// Filters for the public post listing.
#[derive(Debug, Default)]
pub struct PostListFilter {
    pub status: String,
    pub category_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub limit: i64,
    pub offset: i64,
}

/// Post counters for the dashboard stats widget.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostCounts {
    pub total: i64,
    pub published: i64,
    pub draft: i64,
}

/// A post enriched with author, category, tags, and approved-comment count,
/// as rendered on listing pages and the post detail page.
#[derive(Debug, Serialize)]
pub struct PostWithRelations {
    #[serde(flatten)]
    pub post: Post,
    pub author: AuthorProfile,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
    pub comments_count: i64,
}

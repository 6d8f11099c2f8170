//! Handlers for the `/posts` resource.
//!
//! Public reads return posts enriched with author profile, category, tags,
//! and approved-comment count. Writes are authenticated and author-scoped.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use quill_core::error::CoreError;
use quill_core::posts::{
    derive_excerpt, slugify, validate_status, validate_title, STATUS_DRAFT, STATUS_PUBLISHED,
};
use quill_core::types::DbId;
use quill_db::models::post::{
    CreatePost, Post, PostListFilter, PostWithRelations, UpdatePost,
};
use quill_db::repositories::{CategoryRepo, CommentRepo, PostRepo, ProfileRepo, TagRepo};
use quill_events::{DomainEvent, StaleView};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for the public listing.
const DEFAULT_LIMIT: i64 = 10;

/// Maximum page size for the public listing.
const MAX_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct ListPostsParams {
    pub category_id: Option<DbId>,
    pub tag_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<DbId>,
    /// Tag names; unknown names are created on the fly.
    pub tags: Option<Vec<String>>,
    /// `draft` (default) or `published`.
    pub status: Option<String>,
}

/// Request body for `PUT /posts/{id}`.
///
/// The editor submits the full form, so `category_id` clears the category
/// when omitted, and `tags` (when present) replaces the whole tag set.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<DbId>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /posts?category_id=&tag_id=&author_id=&limit=&offset=
///
/// List published posts, newest published first, with relations.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> AppResult<impl axum::response::IntoResponse> {
    let filter = PostListFilter {
        status: STATUS_PUBLISHED.to_string(),
        category_id: params.category_id,
        tag_id: params.tag_id,
        author_id: params.author_id,
        limit: params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        offset: params.offset.unwrap_or(0).max(0),
    };

    let posts = PostRepo::list(&state.pool, &filter).await?;

    let mut enriched = Vec::with_capacity(posts.len());
    for post in posts {
        enriched.push(enrich(&state, post).await?);
    }

    Ok(Json(DataResponse { data: enriched }))
}

/// GET /posts/{slug}
///
/// Fetch a single post by slug with relations. Non-published posts are
/// visible only to their author.
pub async fn get_by_slug(
    OptionalAuthUser(auth): OptionalAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    let post = PostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFoundByKey {
            entity: "Post",
            key: slug.clone(),
        })?;

    if post.status != STATUS_PUBLISHED
        && auth.as_ref().map(|a| a.user_id) != Some(post.author_id)
    {
        // Hide the existence of unpublished posts from other callers.
        return Err(AppError::NotFoundByKey {
            entity: "Post",
            key: slug.clone(),
        });
    }

    let enriched = enrich(&state, post).await?;
    Ok(Json(DataResponse { data: enriched }))
}

/// POST /posts
///
/// Create a post. The slug is generated from the title; the excerpt falls
/// back to a content prefix; `published_at` is stamped when publishing.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePostRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;

    let status = input.status.unwrap_or_else(|| STATUS_DRAFT.to_string());
    validate_status(&status).map_err(AppError::Core)?;

    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Content is required".into(),
        )));
    }

    let slug = slugify(&input.title);
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title must contain at least one alphanumeric character".into(),
        )));
    }

    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let published_at = (status == STATUS_PUBLISHED).then(Utc::now);

    // Duplicate slugs surface as 409 via the uq_posts_slug classifier.
    let post = PostRepo::create(
        &state.pool,
        &CreatePost {
            title: input.title.trim().to_string(),
            slug,
            excerpt: derive_excerpt(input.excerpt.as_deref(), &input.content),
            content: input.content,
            featured_image: input.featured_image,
            status,
            author_id: auth.user_id,
            category_id: input.category_id,
            published_at,
        },
    )
    .await?;

    if let Some(tags) = &input.tags {
        attach_tags(&state, post.id, tags).await?;
    }

    tracing::info!(
        user_id = auth.user_id,
        post_id = post.id,
        slug = %post.slug,
        status = %post.status,
        "Post created"
    );

    state.event_bus.publish(
        DomainEvent::new("post.created")
            .with_source("post", post.id)
            .with_actor(auth.user_id)
            .stales(StaleView::PostIndex)
            .stales(StaleView::PostPage {
                slug: post.slug.clone(),
            }),
    );

    let enriched = enrich(&state, post).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: enriched })))
}

/// PUT /posts/{id}
///
/// Update a post. Author only. Re-derives slug and excerpt when the title
/// or content change, and maintains `published_at` across status
/// transitions (set on publish, cleared on unpublish to draft).
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePostRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    let existing = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if existing.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only edit your own posts".into(),
        )));
    }

    let mut slug = None;
    if let Some(title) = &input.title {
        validate_title(title).map_err(AppError::Core)?;
        let new_slug = slugify(title);
        if new_slug.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Title must contain at least one alphanumeric character".into(),
            )));
        }
        slug = Some(new_slug);
    }

    let status = match &input.status {
        Some(status) => {
            validate_status(status).map_err(AppError::Core)?;
            status.clone()
        }
        None => existing.status.clone(),
    };

    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    // Stamp on first publish, clear when reverting to draft, otherwise keep.
    let published_at = match status.as_str() {
        STATUS_PUBLISHED => existing.published_at.or_else(|| Some(Utc::now())),
        STATUS_DRAFT => None,
        _ => existing.published_at,
    };

    let excerpt = match (&input.excerpt, &input.content) {
        (None, None) => None,
        (explicit, content) => Some(derive_excerpt(
            explicit.as_deref(),
            content.as_deref().unwrap_or(&existing.content),
        )),
    };

    let post = PostRepo::update(
        &state.pool,
        id,
        &UpdatePost {
            title: input.title.map(|t| t.trim().to_string()),
            slug,
            content: input.content,
            excerpt,
            featured_image: input.featured_image,
            status: Some(status),
            category_id: input.category_id,
            published_at,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if let Some(tags) = &input.tags {
        attach_tags(&state, post.id, tags).await?;
    }

    tracing::info!(
        user_id = auth.user_id,
        post_id = id,
        slug = %post.slug,
        status = %post.status,
        "Post updated"
    );

    let mut event = DomainEvent::new("post.updated")
        .with_source("post", post.id)
        .with_actor(auth.user_id)
        .stales(StaleView::PostIndex)
        .stales(StaleView::PostPage {
            slug: post.slug.clone(),
        });
    if existing.slug != post.slug {
        event = event.stales(StaleView::PostPage {
            slug: existing.slug.clone(),
        });
    }
    state.event_bus.publish(event);

    let enriched = enrich(&state, post).await?;
    Ok(Json(DataResponse { data: enriched }))
}

/// DELETE /posts/{id}
///
/// Delete a post. Author only. Comments and tag links cascade.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))?;

    if post.author_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own posts".into(),
        )));
    }

    PostRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, post_id = id, slug = %post.slug, "Post deleted");

    state.event_bus.publish(
        DomainEvent::new("post.deleted")
            .with_source("post", id)
            .with_actor(auth.user_id)
            .stales(StaleView::PostIndex)
            .stales(StaleView::PostPage { slug: post.slug }),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve author profile, category, tags, and approved-comment count for a
/// post.
pub(crate) async fn enrich(state: &AppState, post: Post) -> AppResult<PostWithRelations> {
    let author = ProfileRepo::author_profile(&state.pool, post.author_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Author {} missing for post {}", post.author_id, post.id))
        })?;

    let category = match post.category_id {
        Some(category_id) => CategoryRepo::find_by_id(&state.pool, category_id).await?,
        None => None,
    };

    let tags = TagRepo::list_for_post(&state.pool, post.id).await?;
    let comments_count = CommentRepo::count_approved(&state.pool, post.id).await?;

    Ok(PostWithRelations {
        post,
        author,
        category,
        tags,
        comments_count,
    })
}

/// Validate that a referenced category exists.
async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;
    Ok(())
}

/// Create-or-get each tag name and replace the post's tag set.
async fn attach_tags(state: &AppState, post_id: DbId, names: &[String]) -> AppResult<()> {
    let mut tag_ids = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid tag name '{name}'"
            ))));
        }
        let tag = TagRepo::create_or_get(&state.pool, name, &slug).await?;
        tag_ids.push(tag.id);
    }
    PostRepo::set_tags(&state.pool, post_id, &tag_ids).await?;
    Ok(())
}

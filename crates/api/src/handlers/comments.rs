//! Handlers for the comment subsystem: public thread reads, creation,
//! deletion, and moderation.
//!
//! Permission model:
//! - create: any authenticated user
//! - delete: the comment's author only
//! - status change: the author of the owning post only
//!
//! Validation and authentication are checked before any store mutation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use quill_core::comments::{
    self, validate_content, validate_moderation_status, DEFAULT_STATUS,
};
use quill_core::error::CoreError;
use quill_core::types::DbId;
use quill_db::models::comment::CreateComment;
use quill_db::repositories::{CommentRepo, PostRepo};
use quill_events::{DomainEvent, StaleView};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /comments`.
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: DbId,
    pub content: String,
    /// Present when the comment is a reply to another comment on the post.
    pub parent_id: Option<DbId>,
}

/// Request body for `PATCH /comments/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateCommentStatusRequest {
    /// `approved` or `rejected`.
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /posts/{slug}/comments
///
/// The public comment thread for a post: approved top-level comments oldest
/// first, each with author profile and approved replies. A slug with no
/// matching post yields an empty list, not an error.
pub async fn list_thread(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    let Some(post_id) = PostRepo::resolve_id_by_slug(&state.pool, &slug).await? else {
        return Ok(Json(DataResponse { data: Vec::new() }));
    };

    let thread = CommentRepo::list_thread(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: thread }))
}

/// POST /comments
///
/// Create a comment (or a reply, when `parent_id` is given). New comments
/// are auto-approved.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCommentRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    let content = validate_content(&input.content).map_err(AppError::Core)?;

    let post = PostRepo::find_by_id(&state.pool, input.post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: input.post_id,
        }))?;

    // A reply's parent must exist and belong to the same post.
    if let Some(parent_id) = input.parent_id {
        let parent = CommentRepo::find_by_id(&state.pool, parent_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Comment",
                id: parent_id,
            }))?;

        if parent.post_id != input.post_id {
            return Err(AppError::Core(CoreError::Validation(
                "Parent comment belongs to a different post".into(),
            )));
        }
    }

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            content: content.to_string(),
            author_id: auth.user_id,
            post_id: input.post_id,
            parent_id: input.parent_id,
            status: DEFAULT_STATUS.to_string(),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        comment_id = comment.id,
        post_id = comment.post_id,
        reply = comment.parent_id.is_some(),
        "Comment created"
    );

    state.event_bus.publish(
        DomainEvent::new("comment.created")
            .with_source("comment", comment.id)
            .with_actor(auth.user_id)
            .stales(StaleView::PostPage { slug: post.slug })
            .stales(StaleView::DashboardComments),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /comments/{id}
///
/// Permanently delete a comment. Only the comment's author may do this;
/// replies are removed with their parent.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    if !comments::can_delete(comment.author_id, auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own comments".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;

    tracing::info!(
        user_id = auth.user_id,
        comment_id = id,
        post_id = comment.post_id,
        "Comment deleted"
    );

    let slug = comment_event_slug(&state, comment.post_id).await;
    publish_comment_change(&state, "comment.deleted", &slug, id, auth.user_id);

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /comments/{id}/status
///
/// Transition a comment between `approved` and `rejected`. Restricted to
/// the author of the owning post. Idempotent: re-applying the current
/// status leaves the comment unchanged.
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCommentStatusRequest>,
) -> AppResult<impl axum::response::IntoResponse> {
    validate_moderation_status(&input.status).map_err(AppError::Core)?;

    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    let post = PostRepo::find_by_id(&state.pool, comment.post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: comment.post_id,
        }))?;

    if !comments::can_moderate(post.author_id, auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the post author can moderate its comments".into(),
        )));
    }

    let updated = CommentRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    tracing::info!(
        user_id = auth.user_id,
        comment_id = id,
        status = %updated.status,
        "Comment status updated"
    );

    publish_comment_change(&state, "comment.status_changed", &post.slug, id, auth.user_id);

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the slug for an event after a comment mutation. The post must
/// exist (comments reference it), so a miss degrades to an empty slug
/// rather than failing the already-committed write.
async fn comment_event_slug(state: &AppState, post_id: DbId) -> String {
    match PostRepo::find_by_id(&state.pool, post_id).await {
        Ok(Some(post)) => post.slug,
        _ => String::new(),
    }
}

/// Publish the stale-view event shared by comment mutations.
fn publish_comment_change(
    state: &AppState,
    event_type: &str,
    slug: &str,
    comment_id: DbId,
    actor: DbId,
) {
    state.event_bus.publish(
        DomainEvent::new(event_type)
            .with_source("comment", comment_id)
            .with_actor(actor)
            .stales(StaleView::PostPage {
                slug: slug.to_string(),
            })
            .stales(StaleView::DashboardComments),
    );
}

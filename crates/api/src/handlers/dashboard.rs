//! Handlers for the authenticated dashboard: the caller's posts, the
//! moderation list for comments on those posts, and summary counters.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use quill_db::models::comment::CommentCounts;
use quill_db::models::post::PostCounts;
use quill_db::repositories::{CommentRepo, PostRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Summary counters for the dashboard landing page.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub posts: PostCounts,
    pub comments: CommentCounts,
}

/// GET /dashboard/posts
///
/// All of the caller's posts regardless of status, newest first.
pub async fn list_posts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let posts = PostRepo::list_by_author(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /dashboard/comments
///
/// Every comment (any status) on the caller's posts, newest first, with
/// author and post context.
pub async fn list_comments(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let comments = CommentRepo::list_for_author_posts(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// GET /dashboard/stats
pub async fn stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let posts = PostRepo::counts_for_author(&state.pool, auth.user_id).await?;
    let comments = CommentRepo::counts_for_author_posts(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: DashboardStats { posts, comments },
    }))
}

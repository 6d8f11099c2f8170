//! Handlers for categories and tags.
//!
//! Categories are seeded by migration and read-only over HTTP; tags are
//! created implicitly when attached to a post.

use axum::extract::State;
use axum::Json;

use quill_db::repositories::{CategoryRepo, TagRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /categories
///
/// List all categories ordered by name.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /tags
///
/// List all tags ordered by name.
pub async fn list_tags(
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

//! Route definitions for comment writes and moderation.
//!
//! Mounted at `/comments` by `api_routes()`. The public thread read lives
//! under `/posts/{slug}/comments`.

use axum::routing::{delete, patch, post};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes.
///
/// ```text
/// POST   /               -> create (requires auth)
/// DELETE /{id}           -> delete (comment author only)
/// PATCH  /{id}/status    -> update_status (post author only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(comments::create))
        .route("/{id}", delete(comments::delete))
        .route("/{id}/status", patch(comments::update_status))
}

//! Route definitions for the authenticated dashboard.
//!
//! Mounted at `/dashboard` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes (all require auth).
///
/// ```text
/// GET /posts      -> caller's posts, any status
/// GET /comments   -> moderation list for comments on caller's posts
/// GET /stats      -> summary counters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(dashboard::list_posts))
        .route("/comments", get(dashboard::list_comments))
        .route("/stats", get(dashboard::stats))
}

//! Route definitions for posts and their public comment threads.
//!
//! Mounted at `/posts` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comments, posts};
use crate::state::AppState;

/// Post routes.
///
/// ```text
/// GET    /                  -> list (?category_id, tag_id, author_id, limit, offset)
/// POST   /                  -> create (requires auth)
/// GET    /{slug}            -> get_by_slug
/// GET    /{slug}/comments   -> comment thread (public)
/// PUT    /{id}              -> update (author only)
/// DELETE /{id}              -> delete (author only)
/// ```
///
/// `{slug}` and `{id}` share a path segment: ids are numeric and slugs are
/// generated non-numeric, so the handlers never collide in practice --
/// reads resolve by slug, writes resolve by id.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list).post(posts::create))
        .route(
            "/{slug}",
            get(posts::get_by_slug)
                .put(posts::update)
                .delete(posts::delete),
        )
        .route("/{slug}/comments", get(comments::list_thread))
}

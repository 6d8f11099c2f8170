//! Route definitions for categories and tags.
//!
//! Merged at the `/api/v1` root by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// Taxonomy routes.
///
/// ```text
/// GET /categories   -> list_categories
/// GET /tags         -> list_tags
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(taxonomy::list_categories))
        .route("/tags", get(taxonomy::list_tags))
}

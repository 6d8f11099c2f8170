//! Route definitions for the image library.
//!
//! Mounted at `/images` by `api_routes()`. Stored files are served
//! separately under `/uploads` by the static file layer in `main`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::images;
use crate::state::AppState;

/// Image routes (all require auth).
///
/// ```text
/// GET    /        -> list own images
/// POST   /        -> upload (multipart)
/// DELETE /{id}    -> delete own image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(images::list).post(images::upload))
        .route("/{id}", delete(images::delete))
}

//! Route tree construction.

pub mod auth;
pub mod comments;
pub mod dashboard;
pub mod health;
pub mod images;
pub mod posts;
pub mod profile;
pub mod taxonomy;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      create account (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
///
/// /posts                            list published, create
/// /posts/{slug}                     get by slug
/// /posts/{slug}/comments            public comment thread
/// /posts/{id}                       update, delete (author only)
///
/// /comments                         create (requires auth)
/// /comments/{id}                    delete (comment author only)
/// /comments/{id}/status             moderate (post author only)
///
/// /categories                       list
/// /tags                             list
///
/// /images                           upload, list own (requires auth)
/// /images/{id}                      delete own
///
/// /dashboard/posts                  caller's posts, any status
/// /dashboard/comments               moderation list
/// /dashboard/stats                  summary counters
///
/// /profiles/me                      get, update own profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/posts", posts::router())
        .nest("/comments", comments::router())
        .nest("/images", images::router())
        .nest("/dashboard", dashboard::router())
        .nest("/profiles", profile::router())
        .merge(taxonomy::router())
}

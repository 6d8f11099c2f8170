//! Handlers for the caller's own profile.

use axum::extract::State;
use axum::Json;

use quill_core::error::CoreError;
use quill_db::models::profile::UpdateProfile;
use quill_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /profiles/me
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let profile = ProfileRepo::find_by_user_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse { data: profile }))
}

/// PUT /profiles/me
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<impl axum::response::IntoResponse> {
    let profile = ProfileRepo::update(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: auth.user_id,
        }))?;

    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(DataResponse { data: profile }))
}

//! Handlers for the `/images` resource: multipart upload, gallery listing,
//! and deletion.
//!
//! Files land under `<upload_dir>/<owner_id>/<unique name>` and are served
//! statically at `/uploads/<owner_id>/<unique name>`; each stored file has
//! a matching row in the `images` table.

use std::io::Cursor;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use quill_core::error::CoreError;
use quill_core::images::{storage_path, unique_file_name, validate_content_type, validate_size};
use quill_core::types::DbId;
use quill_db::models::image::{CreateImage, Image};
use quill_db::repositories::ImageRepo;
use quill_events::{DomainEvent, StaleView};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// URL prefix under which uploaded files are served.
const PUBLIC_PREFIX: &str = "/uploads";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An image record plus its public URL.
#[derive(Debug, Serialize)]
pub struct ImageWithUrl {
    #[serde(flatten)]
    pub image: Image,
    pub url: String,
}

impl From<Image> for ImageWithUrl {
    fn from(image: Image) -> Self {
        let url = format!("{PUBLIC_PREFIX}/{}", image.storage_path);
        Self { image, url }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /images
///
/// Accept a single-file multipart upload, store it in the caller's folder,
/// and record it in the image library.
pub async fn upload(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImageWithUrl>>)> {
    // First field carrying a file name is the upload; the original form
    // posts exactly one.
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((original_name, content_type, data));
        break;
    }

    let Some((original_name, content_type, data)) = upload else {
        return Err(AppError::BadRequest(
            "No file received in multipart upload".to_string(),
        ));
    };

    validate_content_type(&content_type).map_err(AppError::Core)?;
    validate_size(data.len() as u64, state.config.max_upload_bytes).map_err(AppError::Core)?;

    // Best-effort dimensions from the image header; an undecodable but
    // correctly-typed file is stored without them.
    let dimensions = image::ImageReader::new(Cursor::new(&data))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.into_dimensions().ok());

    let file_name = unique_file_name(&original_name);
    let relative_path = storage_path(auth.user_id, &file_name);

    let dir = state.config.upload_dir.join(auth.user_id.to_string());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(dir.join(&file_name), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    let image = ImageRepo::create(
        &state.pool,
        &CreateImage {
            owner_id: auth.user_id,
            file_name,
            storage_path: relative_path,
            content_type,
            size_bytes: data.len() as i64,
            width: dimensions.map(|(w, _)| w as i32),
            height: dimensions.map(|(_, h)| h as i32),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        image_id = image.id,
        size_bytes = image.size_bytes,
        "Image uploaded"
    );

    state.event_bus.publish(
        DomainEvent::new("image.uploaded")
            .with_source("image", image.id)
            .with_actor(auth.user_id)
            .stales(StaleView::ImageGallery {
                user_id: auth.user_id,
            }),
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: image.into(),
        }),
    ))
}

/// GET /images
///
/// List the caller's images, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl axum::response::IntoResponse> {
    let images = ImageRepo::list_by_owner(&state.pool, auth.user_id).await?;
    let data: Vec<ImageWithUrl> = images.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse { data }))
}

/// DELETE /images/{id}
///
/// Delete an image record and its stored file. Owner only.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id,
        }))?;

    if image.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own images".into(),
        )));
    }

    ImageRepo::delete(&state.pool, id).await?;

    // The row is authoritative; a missing file only warrants a warning.
    let path = state.config.upload_dir.join(&image.storage_path);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!(image_id = id, error = %e, "Failed to remove stored file");
    }

    tracing::info!(user_id = auth.user_id, image_id = id, "Image deleted");

    state.event_bus.publish(
        DomainEvent::new("image.deleted")
            .with_source("image", id)
            .with_actor(auth.user_id)
            .stales(StaleView::ImageGallery {
                user_id: auth.user_id,
            }),
    );

    Ok(StatusCode::NO_CONTENT)
}

//! HTTP-level integration tests for image upload, listing, and deletion.

mod common;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use common::{auth_token, body_json, create_test_user, delete_auth, get_auth};
use sqlx::PgPool;
use tower::ServiceExt;

const BOUNDARY: &str = "quill-test-boundary";

/// Build a single-file multipart request body.
fn multipart_body(file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a file to /images with the given token.
async fn upload(
    app: axum::Router,
    token: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/images")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(multipart_body(file_name, content_type, data)))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Build an app whose upload dir is a fresh temp directory.
fn app_with_upload_dir(pool: PgPool, dir: &std::path::Path) -> axum::Router {
    let mut config = common::test_config();
    config.upload_dir = dir.to_path_buf();
    common::build_test_app_with_config(pool, config)
}

/// A valid upload stores the file, records the row, and returns its URL.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_stores_file_and_row(pool: PgPool) {
    let user = create_test_user(&pool, "uploader").await;
    let token = auth_token(user.id);
    let dir = tempfile::tempdir().expect("tempdir");

    let app = app_with_upload_dir(pool.clone(), dir.path());
    let response = upload(app, &token, "photo.png", "image/png", b"png-ish bytes").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["owner_id"], user.id);
    assert_eq!(json["data"]["content_type"], "image/png");
    let url = json["data"]["url"].as_str().unwrap();
    assert!(url.starts_with(&format!("/uploads/{}/", user.id)));
    assert!(url.ends_with(".png"));

    // The file landed in the owner's folder.
    let storage_path = json["data"]["storage_path"].as_str().unwrap();
    assert!(dir.path().join(storage_path).exists());

    // And shows up in the gallery listing.
    let app = app_with_upload_dir(pool, dir.path());
    let response = get_auth(app, "/api/v1/images", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Non-image content types are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_non_image(pool: PgPool) {
    let user = create_test_user(&pool, "pdfuploader").await;
    let token = auth_token(user.id);
    let dir = tempfile::tempdir().expect("tempdir");

    let app = app_with_upload_dir(pool, dir.path());
    let response = upload(app, &token, "doc.pdf", "application/pdf", b"%PDF-1.4").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Uploads above the configured size limit are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_rejects_oversize(pool: PgPool) {
    let user = create_test_user(&pool, "biguploader").await;
    let token = auth_token(user.id);
    let dir = tempfile::tempdir().expect("tempdir");

    let mut config = common::test_config();
    config.upload_dir = dir.path().to_path_buf();
    config.max_upload_bytes = 16;

    let app = common::build_test_app_with_config(pool, config);
    let response = upload(app, &token, "big.png", "image/png", &[0u8; 64]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Anonymous uploads are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upload_requires_auth(pool: PgPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_with_upload_dir(pool, dir.path());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/images")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(multipart_body("a.png", "image/png", b"data!")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Only the owner can delete an image; deletion removes row and file.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_owner_only(pool: PgPool) {
    let owner = create_test_user(&pool, "imgowner").await;
    let intruder = create_test_user(&pool, "imgintruder").await;
    let dir = tempfile::tempdir().expect("tempdir");

    let app = app_with_upload_dir(pool.clone(), dir.path());
    let response = upload(app, &auth_token(owner.id), "mine.png", "image/png", b"owner bytes").await;
    let json = body_json(response).await;
    let image_id = json["data"]["id"].as_i64().unwrap();
    let storage_path = json["data"]["storage_path"].as_str().unwrap().to_string();

    let app = app_with_upload_dir(pool.clone(), dir.path());
    let response = delete_auth(
        app,
        &format!("/api/v1/images/{image_id}"),
        &auth_token(intruder.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = app_with_upload_dir(pool.clone(), dir.path());
    let response = delete_auth(
        app,
        &format!("/api/v1/images/{image_id}"),
        &auth_token(owner.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!dir.path().join(&storage_path).exists(), "file removed");

    let app = app_with_upload_dir(pool, dir.path());
    let response = get_auth(app, "/api/v1/images", &auth_token(owner.id)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

//! Upload constraints and storage naming for the image library.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum upload size in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Accepted content-type prefix. Anything under `image/` is allowed; the
/// decoder rejects formats it cannot parse.
pub const CONTENT_TYPE_PREFIX: &str = "image/";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an upload's declared content type.
pub fn validate_content_type(content_type: &str) -> Result<(), CoreError> {
    if content_type.starts_with(CONTENT_TYPE_PREFIX) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Only image files can be uploaded (got '{content_type}')"
        )))
    }
}

/// Validate an upload's size against `max_bytes`.
pub fn validate_size(size: u64, max_bytes: u64) -> Result<(), CoreError> {
    if size == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File exceeds the maximum size of {} bytes",
            max_bytes
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Storage naming
// ---------------------------------------------------------------------------

/// Generate a unique stored file name, preserving the original extension
/// when it has one.
pub fn unique_file_name(original_name: &str) -> String {
    let stamp = uuid::Uuid::new_v4().simple();
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.len() <= 8 && !ext.contains('/') => {
            format!("{stamp}.{}", ext.to_lowercase())
        }
        _ => stamp.to_string(),
    }
}

/// Relative storage path for an owner's file: `<owner_id>/<file_name>`.
///
/// Files live in per-user folders so ownership is visible in the path
/// itself, and the public URL mirrors the relative path.
pub fn storage_path(owner_id: DbId, file_name: &str) -> String {
    format!("{owner_id}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn content_type_gate() {
        assert!(validate_content_type("image/png").is_ok());
        assert!(validate_content_type("image/webp").is_ok());
        assert_matches!(
            validate_content_type("application/pdf"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn size_gate() {
        assert!(validate_size(1024, MAX_UPLOAD_BYTES).is_ok());
        assert_matches!(validate_size(0, MAX_UPLOAD_BYTES), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_size(MAX_UPLOAD_BYTES + 1, MAX_UPLOAD_BYTES),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unique_names_keep_extension() {
        let name = unique_file_name("photo.JPG");
        assert!(name.ends_with(".jpg"));
        // 32 hex chars + ".jpg"
        assert_eq!(name.len(), 36);
    }

    #[test]
    fn unique_names_without_extension() {
        let name = unique_file_name("README");
        assert!(!name.contains('.'));
        assert_eq!(name.len(), 32);
    }

    #[test]
    fn unique_names_do_not_collide() {
        assert_ne!(unique_file_name("a.png"), unique_file_name("a.png"));
    }

    #[test]
    fn storage_path_is_owner_scoped() {
        assert_eq!(storage_path(42, "abc.png"), "42/abc.png");
    }
}

//! Comment moderation policy: status values, content validation, and
//! permission rules.
//!
//! Visibility rule: only `approved` comments appear on public read paths.
//! New comments are auto-approved; a pending-first workflow is representable
//! through the same status set but is not the default.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum comment length in characters, counted after trimming.
pub const MIN_CONTENT_CHARS: usize = 5;

/// Maximum comment length in characters, counted after trimming.
pub const MAX_CONTENT_CHARS: usize = 1000;

/// Awaiting moderation, not publicly visible.
pub const STATUS_PENDING: &str = "pending";

/// Publicly visible.
pub const STATUS_APPROVED: &str = "approved";

/// Rejected by moderation, not publicly visible.
pub const STATUS_REJECTED: &str = "rejected";

/// All statuses a stored comment may carry.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Statuses a moderator may transition a comment to. `pending` is an
/// initial state only, never a moderation target.
pub const MODERATION_STATUSES: &[&str] = &[STATUS_APPROVED, STATUS_REJECTED];

/// Status assigned to newly created comments (auto-approval mode).
pub const DEFAULT_STATUS: &str = STATUS_APPROVED;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate comment content and return the trimmed text to store.
///
/// The trimmed character count must be within
/// [`MIN_CONTENT_CHARS`, `MAX_CONTENT_CHARS`].
pub fn validate_content(content: &str) -> Result<&str, CoreError> {
    let trimmed = content.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(CoreError::Validation(format!(
            "Comment must be at least {MIN_CONTENT_CHARS} characters"
        )));
    }
    if chars > MAX_CONTENT_CHARS {
        return Err(CoreError::Validation(format!(
            "Comment must not exceed {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate a requested moderation status (`approved` or `rejected`).
pub fn validate_moderation_status(status: &str) -> Result<(), CoreError> {
    if MODERATION_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            MODERATION_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Visibility / permissions
// ---------------------------------------------------------------------------

/// Whether a comment with the given status is visible to public readers.
pub fn is_publicly_visible(status: &str) -> bool {
    status == STATUS_APPROVED
}

/// Only the comment's author may delete it.
pub fn can_delete(comment_author_id: DbId, caller_id: DbId) -> bool {
    comment_author_id == caller_id
}

/// Only the author of the owning post may moderate a comment on it.
pub fn can_moderate(post_author_id: DbId, caller_id: DbId) -> bool {
    post_author_id == caller_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn content_below_minimum_rejected() {
        assert_matches!(validate_content("hi"), Err(CoreError::Validation(_)));
        // 4 visible chars padded with whitespace still fails.
        assert_matches!(validate_content("  abcd  "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn content_above_maximum_rejected() {
        let long = "x".repeat(MAX_CONTENT_CHARS + 1);
        assert_matches!(validate_content(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn content_at_bounds_accepted() {
        assert_eq!(validate_content("hello").unwrap(), "hello");
        let max = "x".repeat(MAX_CONTENT_CHARS);
        assert_eq!(validate_content(&max).unwrap(), max);
    }

    #[test]
    fn content_is_trimmed() {
        assert_eq!(validate_content("  hello world  ").unwrap(), "hello world");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Five CJK characters are 15 UTF-8 bytes but must pass.
        assert!(validate_content("评论内容啊").is_ok());
    }

    #[test]
    fn moderation_status_set() {
        assert!(validate_moderation_status(STATUS_APPROVED).is_ok());
        assert!(validate_moderation_status(STATUS_REJECTED).is_ok());
        assert_matches!(
            validate_moderation_status(STATUS_PENDING),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_moderation_status("published"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn visibility_is_approved_only() {
        assert!(is_publicly_visible(STATUS_APPROVED));
        assert!(!is_publicly_visible(STATUS_PENDING));
        assert!(!is_publicly_visible(STATUS_REJECTED));
    }

    #[test]
    fn delete_is_author_only() {
        assert!(can_delete(7, 7));
        assert!(!can_delete(7, 8));
    }

    #[test]
    fn moderation_is_post_author_only() {
        assert!(can_moderate(3, 3));
        assert!(!can_moderate(3, 4));
    }
}

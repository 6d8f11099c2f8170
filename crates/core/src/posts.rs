//! Post status values, slug generation, and excerpt derivation.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Not yet published, visible only to the author.
pub const STATUS_DRAFT: &str = "draft";

/// Publicly listed and readable.
pub const STATUS_PUBLISHED: &str = "published";

/// Removed from public listings without deletion.
pub const STATUS_ARCHIVED: &str = "archived";

/// All valid post statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED, STATUS_ARCHIVED];

/// Maximum post title length in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Number of content characters used when deriving an excerpt.
pub const EXCERPT_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a post title: non-empty after trimming, within the length limit.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(CoreError::Validation(format!(
            "Title must not exceed {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

/// Validate that `status` is one of the allowed post statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Derive a URL slug from a post title.
///
/// Lowercases, drops everything except alphanumerics, whitespace, and
/// hyphens, converts whitespace runs to single hyphens, collapses hyphen
/// runs, and trims leading/trailing hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_hyphen = true; // suppress a leading hyphen
    for c in title.trim().chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' || c == '_' {
            if !prev_hyphen {
                slug.push('-');
                prev_hyphen = true;
            }
        } else if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            prev_hyphen = false;
        }
        // everything else is dropped
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Derive an excerpt from post content: the explicit excerpt when given,
/// otherwise the first [`EXCERPT_CHARS`] characters of the content followed
/// by an ellipsis.
pub fn derive_excerpt(explicit: Option<&str>, content: &str) -> String {
    if let Some(excerpt) = explicit {
        let trimmed = excerpt.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let content = content.trim();
    if content.chars().count() <= EXCERPT_CHARS {
        content.to_string()
    } else {
        let head: String = content.chars().take(EXCERPT_CHARS).collect();
        format!("{head}...")
    }
}

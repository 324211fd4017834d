//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are
//! applied here before any write.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, category, restaurant name
pub const MAX_NAME_LEN: usize = 100;

/// Customer names on settled orders
pub const MIN_CUSTOMER_NAME_LEN: usize = 2;
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Phone numbers (raw, before normalization)
pub const MIN_PHONE_LEN: usize = 5;
pub const MAX_PHONE_LEN: usize = 20;

/// Address, tagline and similar free text
pub const MAX_TEXT_LEN: usize = 200;

// ── Sanitization ─────────────────────────────────────────────────────

/// Strip control characters (newline/tab excepted) and trim whitespace
pub fn sanitize_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

// ── Validation helpers ───────────────────────────────────────────────

/// Validate a required string: non-empty after sanitization, within limit.
/// Returns the sanitized value.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<String, AppError> {
    let clean = sanitize_text(value);
    if clean.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if clean.chars().count() > max_len {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(clean)
}

/// Validate an optional string against a length range. Absent or blank
/// values collapse to `None`; present values are sanitized.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    min_len: usize,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let clean = sanitize_text(raw);
    if clean.is_empty() {
        return Ok(None);
    }
    let len = clean.chars().count();
    if len < min_len {
        return Err(AppError::validation(format!(
            "{field} must be at least {min_len} character(s)"
        )));
    }
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(Some(clean))
}

/// Validate a number lies within [min, max]
pub fn validate_range(value: f64, field: &str, min: f64, max: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

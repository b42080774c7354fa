//! Input validation helpers
//!
//! Centralized text length constants and validation functions.

use crate::core::{EngineError, EngineResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: dish, user
pub const MAX_NAME_LEN: usize = 200;

/// Dish descriptions, order observations
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords
pub const MAX_PASSWORD_LEN: usize = 128;

/// Image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Trim a required string and check it is non-empty and within the length limit.
pub fn required_text(value: &str, field: &'static str, max_len: usize) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_field(field, "must not be empty"));
    }
    check_len(trimmed, field, max_len)?;
    Ok(trimmed.to_string())
}

/// Trim an optional string; empty after trimming becomes `None`.
pub fn optional_text(
    value: Option<&str>,
    field: &'static str,
    max_len: usize,
) -> EngineResult<Option<String>> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => {
            check_len(v, field, max_len)?;
            Ok(Some(v.to_string()))
        }
        _ => Ok(None),
    }
}

/// Check a string is within the length limit (characters, not bytes).
pub fn check_len(value: &str, field: &'static str, max_len: usize) -> EngineResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(EngineError::invalid_field(
            field,
            format!("is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Normalized email: trimmed, lower-cased, must contain `@`.
pub fn normalize_email(email: &str) -> EngineResult<String> {
    let email = required_text(email, "email", MAX_EMAIL_LEN)?.to_lowercase();
    if !email.contains('@') {
        return Err(EngineError::invalid_field("email", "is not an email address"));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("  Sopa  ", "name", 10).unwrap(), "Sopa");
        assert_eq!(
            required_text("   ", "name", 10).unwrap_err().kind(),
            ErrorKind::InvalidField
        );
        assert!(required_text("abcdefghijk", "name", 10).is_err());
    }

    #[test]
    fn test_length_counts_chars() {
        // 4 chars, 8 bytes
        assert!(check_len("ção!", "name", 4).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None, "description", 5).unwrap(), None);
        assert_eq!(optional_text(Some("  "), "description", 5).unwrap(), None);
        assert_eq!(
            optional_text(Some(" ok "), "description", 5).unwrap(),
            Some("ok".to_string())
        );
        assert!(optional_text(Some("too long"), "description", 5).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email(" Admin@Restaurante.COM ").unwrap(),
            "admin@restaurante.com"
        );
        assert!(normalize_email("admin").is_err());
    }
}

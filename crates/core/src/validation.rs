//! Field validation helpers
//!
//! These mirror the constraints the backend enforces so that obviously bad
//! input is rejected before a request is sent.

use crate::error::{CoreError, CoreResult};

/// Maximum length of QR code content
pub const MAX_QR_CONTENT_LEN: usize = 2000;

/// Validate that a string is not empty after trimming
pub fn validate_not_empty(value: &str, field: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "cannot be empty"));
    }
    Ok(())
}

/// Validate URL format
pub fn validate_url(value: &str, field: &str) -> CoreResult<()> {
    url::Url::parse(value)
        .map_err(|e| CoreError::validation(field, format!("invalid URL - {e}")))?;
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str, field: &str) -> CoreResult<()> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoreError::validation(field, "invalid email format")),
    }
}

/// Validate that a value is within an inclusive range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    field: &str,
) -> CoreResult<()> {
    if value < min || value > max {
        return Err(CoreError::validation(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// Validate a `#RRGGBB` colour and return it upper-cased
pub fn normalize_hex_color(value: &str, field: &str) -> CoreResult<String> {
    let digits = value
        .strip_prefix('#')
        .filter(|rest| rest.len() == 6 && rest.chars().all(|c| c.is_ascii_hexdigit()));

    match digits {
        Some(_) => Ok(value.to_ascii_uppercase()),
        None => Err(CoreError::validation(field, "colour must be in #RRGGBB format")),
    }
}

/// Validate QR code content and return it trimmed
pub fn normalize_qr_content(value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    validate_not_empty(trimmed, "content")?;
    if trimmed.chars().count() > MAX_QR_CONTENT_LEN {
        return Err(CoreError::validation(
            "content",
            format!("maximum length is {MAX_QR_CONTENT_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a custom short code: 3-20 characters of letters, digits and hyphen
pub fn validate_short_code(value: &str) -> CoreResult<()> {
    let len = value.chars().count();
    if !(3..=20).contains(&len) || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(CoreError::validation(
            "custom_code",
            "3-20 characters, letters, digits and hyphen only",
        ));
    }
    Ok(())
}

/// Validate a short code used to look a link up
///
/// Generated and custom codes share the alphabet of letters, digits and
/// hyphen, so anything else cannot name a link and must not reach a URL path.
pub fn validate_lookup_code(value: &str) -> CoreResult<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(CoreError::validation(
            "short_code",
            "letters, digits and hyphen only",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_is_upper_cased() {
        assert_eq!(normalize_hex_color("#a1b2c3", "fg").unwrap(), "#A1B2C3");
    }

    #[test]
    fn test_hex_color_rejects_bad_input() {
        for bad in ["a1b2c3", "#a1b2c", "#a1b2c3d", "#ggghhh", ""] {
            assert!(normalize_hex_color(bad, "fg").is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_qr_content_limits() {
        assert_eq!(normalize_qr_content("  https://x.io \n").unwrap(), "https://x.io");
        assert!(normalize_qr_content("   ").is_err());
        assert!(normalize_qr_content(&"a".repeat(MAX_QR_CONTENT_LEN)).is_ok());
        assert!(normalize_qr_content(&"a".repeat(MAX_QR_CONTENT_LEN + 1)).is_err());
    }

    #[test]
    fn test_short_code() {
        assert!(validate_short_code("my-link").is_ok());
        assert!(validate_short_code("ab").is_err());
        assert!(validate_short_code("has space").is_err());
        assert!(validate_short_code(&"x".repeat(21)).is_err());
    }

    #[test]
    fn test_email_and_range() {
        assert!(validate_email("a@b.io", "email").is_ok());
        assert!(validate_email("a@b@c", "email").is_err());
        assert!(validate_email("@b.io", "email").is_err());
        assert!(validate_range(5, 5, 20, "box_size").is_ok());
        assert!(matches!(
            validate_range(21, 5, 20, "box_size"),
            Err(CoreError::Validation { field, .. }) if field == "box_size"
        ));
    }

    #[test]
    fn test_lookup_code() {
        assert!(validate_lookup_code("aB3xYz").is_ok());
        assert!(validate_lookup_code("my-promo-link").is_ok());
        assert!(validate_lookup_code("").is_err());
        assert!(validate_lookup_code("../v1/auth/me").is_err());
        assert!(validate_lookup_code("abc?x=1#f").is_err());
        assert!(validate_lookup_code("caf%C3%A9").is_err());
    }
}

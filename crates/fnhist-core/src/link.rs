//! URL validation shared by link editing and active-URL patterns.

use crate::types::HistoryError;

/// Token substituted for every `*` wildcard before parsing.
pub const WILDCARD_PLACEHOLDER: &str = "example";

/// True when `pattern`, with wildcards substituted, parses as an absolute URL.
pub fn is_valid_url_pattern(pattern: &str) -> bool {
    let candidate = pattern.replace('*', WILDCARD_PLACEHOLDER);
    url::Url::parse(&candidate).is_ok()
}

/// Trim and validate a user-supplied link. Returns the trimmed value.
pub fn validate_link(input: &str) -> Result<String, HistoryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HistoryError::EmptyLink);
    }
    if !is_valid_url_pattern(trimmed) {
        return Err(HistoryError::InvalidLinkFormat(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(is_valid_url_pattern("https://github.com/rust-lang/rust"));
        assert!(is_valid_url_pattern("http://localhost:8080/src/main.rs#L10"));
    }

    #[test]
    fn accepts_wildcards() {
        assert!(is_valid_url_pattern("https://github.com/*"));
        assert!(is_valid_url_pattern("https://github.com/*/blob/*"));
    }

    #[test]
    fn rejects_plain_text() {
        assert!(!is_valid_url_pattern("not a url"));
        assert!(!is_valid_url_pattern("/relative/path"));
    }

    #[test]
    fn validate_trims() {
        assert_eq!(
            validate_link("  https://a.test/x  ").unwrap(),
            "https://a.test/x"
        );
    }

    #[test]
    fn validate_empty_and_invalid() {
        assert_eq!(validate_link("   "), Err(HistoryError::EmptyLink));
        assert!(matches!(
            validate_link("not a url"),
            Err(HistoryError::InvalidLinkFormat(_))
        ));
    }
}

//! Absolute URL validation for `href`/`src` attributes.
//!
//! # Invariants
//! - Only absolute `http`/`https` URLs are accepted.
//! - Callers must substitute a trusted fallback on rejection and still pass
//!   accepted URLs through `escape_html` before placing them in an attribute.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Why a candidate URL was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlRejection {
    /// Field is missing, `null`, or blank.
    Empty,
    /// Field holds a non-string value.
    NotText,
    /// Text does not parse as an absolute URL.
    Malformed(String),
    /// Parsed, but the scheme is not `http`/`https`.
    UnsupportedScheme(String),
}

impl Display for UrlRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "url is empty"),
            Self::NotText => write!(f, "url value is not text"),
            Self::Malformed(reason) => write!(f, "url is not absolute: {reason}"),
            Self::UnsupportedScheme(scheme) => write!(f, "url scheme is not allowed: {scheme}"),
        }
    }
}

impl Error for UrlRejection {}

/// Parses `candidate` and accepts it only as an absolute `http(s)` URL.
pub fn parse_absolute_url(candidate: &str) -> Result<Url, UrlRejection> {
    if candidate.trim().is_empty() {
        return Err(UrlRejection::Empty);
    }
    let parsed = Url::parse(candidate).map_err(|err| UrlRejection::Malformed(err.to_string()))?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(UrlRejection::UnsupportedScheme(parsed.scheme().to_string()));
    }
    Ok(parsed)
}

/// Validates a record value as an absolute `http(s)` URL.
pub fn validate_absolute_url(value: Option<&Value>) -> Result<Url, UrlRejection> {
    match value {
        None | Some(Value::Null) => Err(UrlRejection::Empty),
        Some(Value::String(candidate)) => parse_absolute_url(candidate),
        Some(_) => Err(UrlRejection::NotText),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_absolute_url, validate_absolute_url, UrlRejection};
    use serde_json::json;

    #[test]
    fn accepts_http_and_https() {
        assert!(parse_absolute_url("http://example.com/a").is_ok());
        assert!(parse_absolute_url("https://example.com/a?b=c").is_ok());
        assert!(parse_absolute_url("HTTPS://EXAMPLE.COM").is_ok());
    }

    #[test]
    fn rejects_relative_paths() {
        assert!(matches!(
            parse_absolute_url("/relative/path"),
            Err(UrlRejection::Malformed(_))
        ));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(
            parse_absolute_url("javascript:alert(1)"),
            Err(UrlRejection::UnsupportedScheme("javascript".to_string()))
        );
        assert_eq!(
            parse_absolute_url("ftp://x"),
            Err(UrlRejection::UnsupportedScheme("ftp".to_string()))
        );
    }

    #[test]
    fn rejects_missing_and_non_text_values() {
        assert_eq!(validate_absolute_url(None), Err(UrlRejection::Empty));
        assert_eq!(
            validate_absolute_url(Some(&json!(null))),
            Err(UrlRejection::Empty)
        );
        assert_eq!(
            validate_absolute_url(Some(&json!(""))),
            Err(UrlRejection::Empty)
        );
        assert_eq!(
            validate_absolute_url(Some(&json!(12))),
            Err(UrlRejection::NotText)
        );
    }
}

//! Rich-text sanitization.
//!
//! # Responsibility
//! - Reduce untrusted description markup to a small formatting vocabulary.
//!
//! # Invariants
//! - Input is parsed into a tree and re-serialized; only allowlisted tags and
//!   attributes survive.
//! - `script`, `style`, `iframe`, `noscript` and `object` are dropped together
//!   with their contents. Every other unknown element (including `link`) is
//!   dropped while its text is kept.
//! - Links accept only `http`, `https` and `mailto` targets and always carry
//!   `rel="noopener noreferrer"`.
//! - Output never contains a `javascript:` substring.
//!
//! # Residual risk
//! The allowlist is only as narrow as `ALLOWED_TAGS`. Widening it (styles,
//! SVG, form controls) reopens injection surface and needs its own review.

use ammonia::{Builder, UrlRelative};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

const ALLOWED_TAGS: [&str; 25] = [
    "a",
    "b",
    "blockquote",
    "br",
    "code",
    "div",
    "em",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "i",
    "li",
    "mark",
    "ol",
    "p",
    "pre",
    "s",
    "small",
    "span",
    "strong",
    "sub",
    "sup",
    "ul",
];

const DROPPED_WITH_CONTENT: [&str; 5] = ["script", "style", "iframe", "noscript", "object"];

const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

static RICH_TEXT_POLICY: Lazy<Builder<'static>> = Lazy::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::from(ALLOWED_TAGS))
        .clean_content_tags(HashSet::from(DROPPED_WITH_CONTENT))
        .generic_attributes(HashSet::new())
        .tag_attributes(HashMap::from([("a", HashSet::from(["href"]))]))
        .url_schemes(HashSet::from(LINK_SCHEMES))
        .url_relative(UrlRelative::Deny)
        .link_rel(Some("noopener noreferrer"))
        .strip_comments(true);
    builder
});

static SCRIPT_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)javascript:").expect("valid script scheme regex"));

/// Sanitizes untrusted markup down to the allowlisted formatting subset.
pub fn sanitize_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let cleaned = RICH_TEXT_POLICY.clean(html).to_string();
    strip_script_scheme(cleaned)
}

/// Sanitizes a record value that may contain rich text.
///
/// Returns an empty string when the value is missing or not a JSON string.
pub fn sanitize_rich_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(html)) => sanitize_html(html),
        _ => String::new(),
    }
}

// Removal can splice a new match together (`javajavascript:script:`), so
// repeat until none is left. Each pass strictly shortens the string.
fn strip_script_scheme(mut html: String) -> String {
    while SCRIPT_SCHEME_RE.is_match(&html) {
        html = SCRIPT_SCHEME_RE.replace_all(&html, "").into_owned();
    }
    html
}

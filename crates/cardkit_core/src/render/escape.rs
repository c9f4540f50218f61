//! Plain-text escaping.
//!
//! `escape_html` is the one conversion from untrusted text to markup-safe
//! text. Its output is valid in element bodies and in single- or
//! double-quoted attribute values.

use serde_json::Value;

/// Replaces `& < > " ' /` with their HTML entities.
///
/// Every other character is copied unchanged. Applying it twice escapes the
/// entities produced by the first pass.
pub fn escape_html(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            '/' => output.push_str("&#x2F;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Escapes a record value that should be plain text.
///
/// Returns an empty string when the value is missing or not a JSON string.
pub fn escape_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => escape_html(text),
        _ => String::new(),
    }
}

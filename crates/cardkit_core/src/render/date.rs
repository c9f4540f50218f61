//! Derived date fields: display date and relative age.
//!
//! Parsing is lenient about input shape (RFC 3339, SQL timestamps, bare
//! dates, epoch milliseconds) and never fails loudly. Timestamps without an
//! offset are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

const OFFSET_DATETIME_FORMATS: [&str; 1] = ["%Y-%m-%d %H:%M:%S%.f%#z"];
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%b %-d, %Y";
const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parses date text into a UTC instant.
pub fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_DATETIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Parses a record value (text or epoch milliseconds) into a UTC instant.
pub fn parse_date_value(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(text) => parse_date_text(text),
        Value::Number(number) => {
            let millis = match number.as_i64() {
                Some(millis) => millis,
                None => number.as_f64().filter(|ms| ms.is_finite())? as i64,
            };
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

/// Formats an instant as `Mon D, YYYY`, e.g. `May 1, 2024`.
pub fn format_display_date(date: DateTime<Utc>) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Whole days between `date` and `now`, rounded up, ignoring direction.
pub fn day_distance(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (now - date).num_milliseconds().abs();
    (millis + MS_PER_DAY - 1) / MS_PER_DAY
}

/// Human label for how long ago `date` was relative to `now`.
pub fn relative_age_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = day_distance(date, now);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => plural_ago(days / 7, "week"),
        _ => plural_ago(days / 30, "month"),
    }
}

fn plural_ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

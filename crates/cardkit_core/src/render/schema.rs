//! Declarative field schemas for card templates.
//!
//! # Responsibility
//! - Map every field a template reads to exactly one treatment.
//! - Resolve a raw `Record` into treated values before any template runs.
//!
//! # Invariants
//! - Templates read record data only through `SafeFields`.
//! - A template lookup must name a field declared in its schema with the
//!   matching treatment. Mismatches trip a debug assertion and resolve to
//!   an empty value in release builds.

use crate::model::card::CardKind;
use crate::model::record::Record;
use crate::render::date::parse_date_value;
use crate::render::escape::{escape_html, escape_text};
use crate::render::sanitize::sanitize_rich_text;
use crate::render::url::validate_absolute_url;
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// How one record field is made safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Treatment {
    /// Escaped with `escape_html`; safe in text and attributes.
    PlainText,
    /// Sanitized with the rich-text allowlist; body content only.
    RichText,
    /// Validated as absolute `http(s)`; rejected values become `None`.
    Url,
    /// Parsed into an instant; unparseable values become `None`.
    Date,
}

/// One declared template field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub treatment: Treatment,
    /// Plain-text value used when the field is blank.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn plain(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            treatment: Treatment::PlainText,
            default: Some(default),
        }
    }

    pub const fn rich(name: &'static str) -> Self {
        Self {
            name,
            treatment: Treatment::RichText,
            default: None,
        }
    }

    pub const fn url(name: &'static str) -> Self {
        Self {
            name,
            treatment: Treatment::Url,
            default: None,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            treatment: Treatment::Date,
            default: None,
        }
    }
}

/// Field declarations for one card kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSchema {
    pub kind: CardKind,
    pub fields: &'static [FieldSpec],
}

pub const EVENT_SCHEMA: TemplateSchema = TemplateSchema {
    kind: CardKind::Event,
    fields: &[
        FieldSpec::plain("title", "Untitled Event"),
        FieldSpec::rich("description"),
        FieldSpec::date("date"),
        FieldSpec::url("image"),
    ],
};

pub const ACTIVITY_SCHEMA: TemplateSchema = TemplateSchema {
    kind: CardKind::Activity,
    fields: &[
        FieldSpec::plain("title", "Activity"),
        FieldSpec::rich("description"),
        FieldSpec::date("date"),
    ],
};

pub const TEAM_MEMBER_SCHEMA: TemplateSchema = TemplateSchema {
    kind: CardKind::TeamMember,
    fields: &[
        FieldSpec::plain("name", "Team Member"),
        FieldSpec::plain("position", "Member"),
        FieldSpec::url("image_url"),
        FieldSpec::url("linkedin_url"),
        FieldSpec::url("profile_url"),
    ],
};

/// Returns the schema the template for `kind` is written against.
pub fn schema_for(kind: CardKind) -> &'static TemplateSchema {
    match kind {
        CardKind::Event => &EVENT_SCHEMA,
        CardKind::Activity => &ACTIVITY_SCHEMA,
        CardKind::TeamMember => &TEAM_MEMBER_SCHEMA,
    }
}

impl TemplateSchema {
    /// Validates declaration-level schema invariants.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in self.fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName(self.kind));
            }
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField {
                    kind: self.kind,
                    field: field.name,
                });
            }
            if field.default.is_some() && field.treatment != Treatment::PlainText {
                return Err(SchemaError::DefaultOnNonText {
                    kind: self.kind,
                    field: field.name,
                });
            }
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Schema declaration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    EmptyFieldName(CardKind),
    DuplicateField {
        kind: CardKind,
        field: &'static str,
    },
    DefaultOnNonText {
        kind: CardKind,
        field: &'static str,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFieldName(kind) => {
                write!(f, "{} schema declares an empty field name", kind.as_str())
            }
            Self::DuplicateField { kind, field } => {
                write!(f, "{} schema declares `{field}` twice", kind.as_str())
            }
            Self::DefaultOnNonText { kind, field } => write!(
                f,
                "{} schema sets a default on non-text field `{field}`",
                kind.as_str()
            ),
        }
    }
}

impl Error for SchemaError {}

/// A treated field value, ready for a template.
#[derive(Debug, Clone, PartialEq)]
pub enum SafeValue {
    Text(String),
    Html(String),
    Url(Option<Url>),
    Date(Option<DateTime<Utc>>),
}

/// Record fields after every declared treatment has been applied.
#[derive(Debug, Clone)]
pub struct SafeFields {
    schema: &'static TemplateSchema,
    values: Vec<SafeValue>,
}

impl SafeFields {
    /// Applies `schema` to `record`. Never fails; bad fields degrade.
    pub fn resolve(record: &Record, schema: &'static TemplateSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| resolve_field(record, schema.kind, field))
            .collect();
        Self { schema, values }
    }

    pub fn kind(&self) -> CardKind {
        self.schema.kind
    }

    /// Escaped plain text for a `PlainText` field.
    pub fn text(&self, name: &str) -> &str {
        match self.lookup(name, Treatment::PlainText) {
            Some(SafeValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Sanitized markup for a `RichText` field.
    pub fn html(&self, name: &str) -> &str {
        match self.lookup(name, Treatment::RichText) {
            Some(SafeValue::Html(html)) => html,
            _ => "",
        }
    }

    /// Validated URL for a `Url` field, or `None` when it was rejected.
    pub fn url(&self, name: &str) -> Option<&Url> {
        match self.lookup(name, Treatment::Url) {
            Some(SafeValue::Url(url)) => url.as_ref(),
            _ => None,
        }
    }

    /// Parsed instant for a `Date` field, or `None` when unparseable.
    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.lookup(name, Treatment::Date) {
            Some(SafeValue::Date(date)) => *date,
            _ => None,
        }
    }

    fn lookup(&self, name: &str, treatment: Treatment) -> Option<&SafeValue> {
        let position = self
            .schema
            .fields
            .iter()
            .position(|field| field.name == name && field.treatment == treatment);
        debug_assert!(
            position.is_some(),
            "{} template reads `{name}` as {treatment:?} without declaring it",
            self.schema.kind.as_str()
        );
        position.and_then(|index| self.values.get(index))
    }
}

fn resolve_field(record: &Record, kind: CardKind, field: &FieldSpec) -> SafeValue {
    match field.treatment {
        Treatment::PlainText => match (record.present(field.name), field.default) {
            (Some(value), _) => SafeValue::Text(escape_text(Some(value))),
            (None, Some(default)) => SafeValue::Text(escape_html(default)),
            (None, None) => SafeValue::Text(String::new()),
        },
        Treatment::RichText => SafeValue::Html(sanitize_rich_text(record.get(field.name))),
        Treatment::Url => match validate_absolute_url(record.get(field.name)) {
            Ok(url) => SafeValue::Url(Some(url)),
            Err(reason) => {
                debug!(
                    "event=field_degraded module=render kind={} field={} reason=\"{}\"",
                    kind.as_str(),
                    field.name,
                    reason
                );
                SafeValue::Url(None)
            }
        },
        Treatment::Date => {
            let parsed = parse_date_value(record.get(field.name));
            if parsed.is_none() {
                debug!(
                    "event=field_degraded module=render kind={} field={} reason=unparseable_date",
                    kind.as_str(),
                    field.name
                );
            }
            SafeValue::Date(parsed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        schema_for, FieldSpec, SafeFields, SchemaError, TemplateSchema, Treatment,
    };
    use crate::model::card::CardKind;
    use crate::model::record::Record;
    use serde_json::json;

    #[test]
    fn builtin_schemas_are_valid() {
        for kind in CardKind::ALL {
            let schema = schema_for(kind);
            assert_eq!(schema.kind, kind);
            schema.validate().expect("builtin schema should validate");
        }
    }

    #[test]
    fn rejects_duplicate_fields() {
        const DUPLICATED: TemplateSchema = TemplateSchema {
            kind: CardKind::Event,
            fields: &[FieldSpec::rich("description"), FieldSpec::url("description")],
        };
        assert_eq!(
            DUPLICATED.validate().unwrap_err(),
            SchemaError::DuplicateField {
                kind: CardKind::Event,
                field: "description",
            }
        );
    }

    #[test]
    fn rejects_default_on_url_field() {
        const BAD_DEFAULT: TemplateSchema = TemplateSchema {
            kind: CardKind::TeamMember,
            fields: &[FieldSpec {
                name: "image_url",
                treatment: Treatment::Url,
                default: Some("https://example.com/a.png"),
            }],
        };
        assert!(matches!(
            BAD_DEFAULT.validate().unwrap_err(),
            SchemaError::DefaultOnNonText { .. }
        ));
    }

    #[test]
    fn resolve_applies_each_treatment() {
        let record = Record::from_value(json!({
            "title": "Tea & <Talks>",
            "description": "<em>ok</em><script>x()</script>",
            "date": "2024-05-01",
            "image": "javascript:alert(1)"
        }))
        .unwrap();

        let fields = SafeFields::resolve(&record, schema_for(CardKind::Event));
        assert_eq!(fields.text("title"), "Tea &amp; &lt;Talks&gt;");
        assert_eq!(fields.html("description"), "<em>ok</em>");
        assert!(fields.date("date").is_some());
        assert!(fields.url("image").is_none());
    }

    #[test]
    fn blank_plain_text_uses_schema_default() {
        let record = Record::new().with_field("name", "");
        let fields = SafeFields::resolve(&record, schema_for(CardKind::TeamMember));
        assert_eq!(fields.text("name"), "Team Member");
        assert_eq!(fields.text("position"), "Member");
    }

    #[test]
    fn non_text_plain_field_escapes_to_empty() {
        let record = Record::new().with_field("title", 42);
        let fields = SafeFields::resolve(&record, schema_for(CardKind::Activity));
        assert_eq!(fields.text("title"), "");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "without declaring it")]
    fn undeclared_lookup_trips_debug_assertion() {
        let fields = SafeFields::resolve(&Record::new(), schema_for(CardKind::Activity));
        let _ = fields.url("image");
    }
}

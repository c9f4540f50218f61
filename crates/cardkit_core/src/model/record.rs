//! Untrusted row model.
//!
//! # Responsibility
//! - Hold one row exactly as the upstream source produced it.
//! - Offer non-failing field lookups for the render pipeline.
//!
//! # Invariants
//! - A `Record` is never trusted; values reach markup only through
//!   `crate::render`.
//! - Lookups never fail. A missing field is `None`, not an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row from a collection, keyed by column/field name.
///
/// Values keep their JSON type so the pipeline can tell text from numbers,
/// booleans and nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from an arbitrary JSON value.
    ///
    /// Returns `None` unless the value is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Builder-style field insertion, mostly for fixtures.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces one field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns the raw value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the field when it is present and not "blank".
    ///
    /// Blank means `null`, `false`, zero, or an empty string. Callers use
    /// this to decide when a template default applies.
    pub fn present(&self, name: &str) -> Option<&Value> {
        match self.fields.get(name) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => None,
            Some(Value::String(text)) if text.is_empty() => None,
            Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
            Some(value) => Some(value),
        }
    }

    /// Whether the field holds an affirmative flag (`true` or `1`).
    pub fn is_flag_set(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_i64() == Some(1),
            _ => false,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

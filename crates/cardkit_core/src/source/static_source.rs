//! In-memory record source.
//!
//! # Invariants
//! - Sorting is stable: rows with equal keys keep their inserted order.
//! - Rows without an order key (missing or `null`) sort last in both
//!   directions.

use super::{CollectionQuery, RecordSource, SourceError, SourceResult, ACTIVE_FLAG_FIELD};
use crate::model::record::Record;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Collections held in memory, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    collections: BTreeMap<String, Vec<Record>>,
}

impl StaticRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, table: impl Into<String>, records: Vec<Record>) -> Self {
        self.insert_collection(table, records);
        self
    }

    pub fn insert_collection(&mut self, table: impl Into<String>, records: Vec<Record>) {
        self.collections.insert(table.into(), records);
    }

    /// Loads collections from a JSON object of `table -> [row, ...]`.
    pub fn from_json_str(raw: &str) -> SourceResult<Self> {
        Self::from_json_value(serde_json::from_str(raw)?)
    }

    pub fn from_json_value(value: Value) -> SourceResult<Self> {
        let Value::Object(tables) = value else {
            return Err(SourceError::InvalidData(
                "expected an object of table name to row array".to_string(),
            ));
        };

        let mut source = Self::new();
        for (table, rows) in tables {
            let Value::Array(rows) = rows else {
                return Err(SourceError::InvalidData(format!(
                    "collection `{table}` is not an array"
                )));
            };
            let records = rows
                .into_iter()
                .enumerate()
                .map(|(index, row)| {
                    Record::from_value(row).ok_or_else(|| {
                        SourceError::InvalidData(format!(
                            "row #{index} of `{table}` is not an object"
                        ))
                    })
                })
                .collect::<SourceResult<Vec<_>>>()?;
            source.insert_collection(table, records);
        }
        Ok(source)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}

impl RecordSource for StaticRecordSource {
    fn fetch(&self, query: &CollectionQuery) -> SourceResult<Vec<Record>> {
        query.validate()?;
        let rows = self
            .collections
            .get(&query.table)
            .ok_or_else(|| SourceError::UnknownCollection(query.table.clone()))?;

        let mut selected: Vec<Record> = rows
            .iter()
            .filter(|row| !query.active_only || row.is_flag_set(ACTIVE_FLAG_FIELD))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            compare_order_keys(a.get(&query.order_by), b.get(&query.order_by), query.ascending)
        });
        Ok(selected)
    }
}

fn compare_order_keys(a: Option<&Value>, b: Option<&Value>, ascending: bool) -> Ordering {
    let a = a.filter(|value| !value.is_null());
    let b = b.filter(|value| !value.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        }
    }
}

// Mixed types order as booleans < numbers < strings < everything else.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(f64::NAN);
            let b = b.as_f64().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::StaticRecordSource;
    use crate::source::{CollectionQuery, RecordSource, SourceError};
    use serde_json::json;

    fn titles(records: &[crate::model::record::Record]) -> Vec<String> {
        records
            .iter()
            .map(|record| record.get("title").and_then(|v| v.as_str()).unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn sorts_ascending_and_descending_with_missing_keys_last() {
        let source = StaticRecordSource::from_json_value(json!({
            "upcoming_events": [
                {"title": "b", "date": "2024-02-01"},
                {"title": "none"},
                {"title": "a", "date": "2024-01-01"},
                {"title": "c", "date": "2024-03-01"}
            ]
        }))
        .unwrap();

        let ascending = source
            .fetch(&CollectionQuery::new("upcoming_events", "date", true))
            .unwrap();
        assert_eq!(titles(&ascending), ["a", "b", "c", "none"]);

        let descending = source
            .fetch(&CollectionQuery::new("upcoming_events", "date", false))
            .unwrap();
        assert_eq!(titles(&descending), ["c", "b", "a", "none"]);
    }

    #[test]
    fn numeric_keys_sort_numerically() {
        let source = StaticRecordSource::from_json_value(json!({
            "team_members": [
                {"title": "ten", "display_order": 10, "is_active": true},
                {"title": "two", "display_order": 2, "is_active": true},
                {"title": "hidden", "display_order": 1, "is_active": false}
            ]
        }))
        .unwrap();

        let query = CollectionQuery::new("team_members", "display_order", true).active_only();
        assert_eq!(titles(&source.fetch(&query).unwrap()), ["two", "ten"]);
    }

    #[test]
    fn unknown_collection_is_an_error() {
        let source = StaticRecordSource::new();
        let err = source
            .fetch(&CollectionQuery::new("missing", "date", true))
            .unwrap_err();
        assert!(matches!(err, SourceError::UnknownCollection(name) if name == "missing"));
    }

    #[test]
    fn rejects_malformed_json_shapes() {
        assert!(matches!(
            StaticRecordSource::from_json_value(json!([1, 2])),
            Err(SourceError::InvalidData(_))
        ));
        assert!(matches!(
            StaticRecordSource::from_json_value(json!({"upcoming_events": {"a": 1}})),
            Err(SourceError::InvalidData(_))
        ));
        assert!(matches!(
            StaticRecordSource::from_json_value(json!({"upcoming_events": ["x"]})),
            Err(SourceError::InvalidData(_))
        ));
        assert!(matches!(
            StaticRecordSource::from_json_str("{"),
            Err(SourceError::Json(_))
        ));
    }
}

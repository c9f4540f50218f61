//! SQLite-backed record source.
//!
//! # Invariants
//! - Table, order key and filter column are checked against the live schema
//!   before they are placed in SQL text.
//! - Each column maps to one JSON value: NULL→null, INTEGER/REAL→number,
//!   TEXT→string, BLOB→null.

use super::{CollectionQuery, RecordSource, SourceError, SourceResult, ACTIVE_FLAG_FIELD};
use crate::db::table_columns;
use crate::model::record::Record;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};
use serde_json::{Map, Number, Value};

/// Reads collections from tables in one SQLite connection.
pub struct SqliteRecordSource<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordSource<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RecordSource for SqliteRecordSource<'_> {
    fn fetch(&self, query: &CollectionQuery) -> SourceResult<Vec<Record>> {
        query.validate()?;
        let columns = table_columns(self.conn, &query.table)?;

        if !columns.iter().any(|column| column == &query.order_by) {
            return Err(SourceError::InvalidQuery(format!(
                "table `{}` has no column `{}`",
                query.table, query.order_by
            )));
        }
        if query.active_only && !columns.iter().any(|column| column == ACTIVE_FLAG_FIELD) {
            return Err(SourceError::InvalidQuery(format!(
                "table `{}` has no `{ACTIVE_FLAG_FIELD}` column",
                query.table
            )));
        }

        let mut sql = format!("SELECT * FROM \"{}\"", query.table);
        if query.active_only {
            sql.push_str(&format!(" WHERE \"{ACTIVE_FLAG_FIELD}\" = 1"));
        }
        let direction = if query.ascending { "ASC" } else { "DESC" };
        sql.push_str(&format!(
            " ORDER BY \"{}\" {direction} NULLS LAST, rowid ASC;",
            query.order_by
        ));

        let mut stmt = self.conn.prepare(&sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row, &names)?);
        }
        Ok(records)
    }
}

fn parse_record_row(row: &Row<'_>, names: &[String]) -> SourceResult<Record> {
    let mut fields = Map::with_capacity(names.len());
    for (index, name) in names.iter().enumerate() {
        let value = match row.get_ref(index)? {
            ValueRef::Null | ValueRef::Blob(_) => Value::Null,
            ValueRef::Integer(integer) => Value::from(integer),
            ValueRef::Real(real) => Number::from_f64(real).map_or(Value::Null, Value::Number),
            ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        };
        fields.insert(name.clone(), value);
    }
    Ok(Record::from(fields))
}

//! JSON row import into site tables.

use super::tables::table_columns;
use super::{DbError, DbResult};
use crate::model::record::Record;
use log::info;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use std::collections::BTreeSet;

/// Inserts `rows` into `table` in one transaction.
///
/// Every field name must be an existing column of `table`; the whole import
/// is rolled back on the first bad row.
///
/// Returns the number of inserted rows.
pub fn import_rows(conn: &mut Connection, table: &str, rows: &[Record]) -> DbResult<usize> {
    let columns: BTreeSet<String> = table_columns(conn, table)?.into_iter().collect();

    let tx = conn.transaction()?;
    for (index, row) in rows.iter().enumerate() {
        let mut names = Vec::with_capacity(row.len());
        let mut values = Vec::with_capacity(row.len());
        for name in row.field_names() {
            if !columns.contains(name) {
                return Err(DbError::UnknownColumn {
                    table: table.to_string(),
                    column: name.to_string(),
                });
            }
            let value = row.get(name).unwrap_or(&Value::Null);
            values.push(to_sql_value(value).map_err(|message| DbError::InvalidRow {
                index,
                message: format!("column `{name}`: {message}"),
            })?);
            names.push(format!("\"{name}\""));
        }

        if names.is_empty() {
            tx.execute(&format!("INSERT INTO \"{table}\" DEFAULT VALUES;"), [])?;
        } else {
            let placeholders = (1..=names.len())
                .map(|position| format!("?{position}"))
                .collect::<Vec<_>>()
                .join(", ");
            tx.execute(
                &format!(
                    "INSERT INTO \"{table}\" ({}) VALUES ({placeholders});",
                    names.join(", ")
                ),
                params_from_iter(values),
            )?;
        }
    }
    tx.commit()?;

    info!(
        "event=db_import module=db status=ok table={} rows={}",
        table,
        rows.len()
    );
    Ok(rows.len())
}

fn to_sql_value(value: &Value) -> Result<SqlValue, &'static str> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(flag) => Ok(SqlValue::Integer(i64::from(*flag))),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => Ok(SqlValue::Integer(integer)),
            None => number
                .as_f64()
                .map(SqlValue::Real)
                .ok_or("number is out of range"),
        },
        Value::String(text) => Ok(SqlValue::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => Err("nested values are not supported"),
    }
}

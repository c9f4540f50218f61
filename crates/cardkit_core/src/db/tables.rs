//! Schema introspection helpers.

use super::{DbError, DbResult};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Whether `value` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER_RE.is_match(value)
}

/// Lists the columns of `table` in declaration order.
///
/// # Errors
/// - `UnknownTable` when the name is not an identifier or no such table exists.
pub fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    if !is_identifier(table) {
        return Err(DbError::UnknownTable(table.to_string()));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid;")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(DbError::UnknownTable(table.to_string()));
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{is_identifier, table_columns};
    use crate::db::{open_db_in_memory, DbError};

    #[test]
    fn identifier_check() {
        assert!(is_identifier("team_members"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("events; DROP TABLE x"));
        assert!(!is_identifier("a\"b"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn lists_migrated_columns() {
        let conn = open_db_in_memory().unwrap();
        let columns = table_columns(&conn, "team_members").unwrap();
        assert_eq!(columns.first().map(String::as_str), Some("id"));
        assert!(columns.iter().any(|column| column == "display_order"));
        assert!(columns.iter().any(|column| column == "is_active"));
    }

    #[test]
    fn unknown_table_is_reported() {
        let conn = open_db_in_memory().unwrap();
        let err = table_columns(&conn, "sponsors").unwrap_err();
        assert!(matches!(err, DbError::UnknownTable(name) if name == "sponsors"));
    }
}

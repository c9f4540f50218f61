//! SQLite storage for site collections.
//!
//! # Responsibility
//! - Open and configure SQLite connections holding the site tables.
//! - Apply schema migrations in deterministic order.
//! - Import JSON rows into known tables.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Table and column names reach SQL text only after they have been checked
//!   against the live schema.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod import;
pub mod migrations;
mod open;
mod tables;

pub use import::import_rows;
pub use open::{open_db, open_db_in_memory, open_existing_db};
pub use tables::{is_identifier, table_columns};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    UnknownTable(String),
    UnknownColumn {
        table: String,
        column: String,
    },
    InvalidRow {
        index: usize,
        message: String,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UnknownTable(table) => write!(f, "unknown table `{table}`"),
            Self::UnknownColumn { table, column } => {
                write!(f, "unknown column `{column}` in table `{table}`")
            }
            Self::InvalidRow { index, message } => write!(f, "invalid row #{index}: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

//! Upstream record sources.
//!
//! # Responsibility
//! - Define the contract for fetching one ordered collection of records.
//! - Describe each card kind's default collection query.
//!
//! # Invariants
//! - Sources own ordering and filtering. Renderers never reorder.
//! - Queries are validated before any source touches its backend.

use crate::db::{is_identifier, DbError};
use crate::model::card::CardKind;
use crate::model::record::Record;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite_source;
pub mod static_source;

/// Column consulted when a query asks for active rows only.
pub const ACTIVE_FLAG_FIELD: &str = "is_active";

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to produce a collection.
#[derive(Debug)]
pub enum SourceError {
    /// Query names are not plain identifiers, or reference missing columns.
    InvalidQuery(String),
    UnknownCollection(String),
    Db(DbError),
    Json(serde_json::Error),
    InvalidData(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery(message) => write!(f, "invalid collection query: {message}"),
            Self::UnknownCollection(name) => write!(f, "unknown collection `{name}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid collection json: {err}"),
            Self::InvalidData(message) => write!(f, "invalid collection data: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SourceError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::UnknownTable(name) => Self::UnknownCollection(name),
            other => Self::Db(other),
        }
    }
}

impl From<rusqlite::Error> for SourceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Which collection to fetch and how to order/filter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub table: String,
    pub order_by: String,
    pub ascending: bool,
    /// Keep only rows whose `is_active` flag is set.
    pub active_only: bool,
}

impl CollectionQuery {
    pub fn new(table: impl Into<String>, order_by: impl Into<String>, ascending: bool) -> Self {
        Self {
            table: table.into(),
            order_by: order_by.into(),
            ascending,
            active_only: false,
        }
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// The query the site issues for `kind`.
    ///
    /// - events: `upcoming_events` by `date`, oldest first
    /// - activities: `recent_activities` by `date`, newest first
    /// - team members: active `team_members` by `display_order`
    pub fn for_kind(kind: CardKind) -> Self {
        match kind {
            CardKind::Event => Self::new("upcoming_events", "date", true),
            CardKind::Activity => Self::new("recent_activities", "date", false),
            CardKind::TeamMember => Self::new("team_members", "display_order", true).active_only(),
        }
    }

    pub fn validate(&self) -> SourceResult<()> {
        if !is_identifier(&self.table) {
            return Err(SourceError::InvalidQuery(format!(
                "table `{}` is not a plain identifier",
                self.table
            )));
        }
        if !is_identifier(&self.order_by) {
            return Err(SourceError::InvalidQuery(format!(
                "order key `{}` is not a plain identifier",
                self.order_by
            )));
        }
        Ok(())
    }
}

/// Opaque upstream producer of ordered records.
pub trait RecordSource {
    fn fetch(&self, query: &CollectionQuery) -> SourceResult<Vec<Record>>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn fetch(&self, query: &CollectionQuery) -> SourceResult<Vec<Record>> {
        (**self).fetch(query)
    }
}

//! Core rendering logic for cardkit.
//! This crate is the single source of truth for turning untrusted rows into
//! trusted HTML card fragments.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;
pub mod source;
pub mod target;

pub use config::{OptionsError, RenderOptions};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::card::{CardKind, Placeholders};
pub use model::record::Record;
pub use render::escape::{escape_html, escape_text};
pub use render::sanitize::{sanitize_html, sanitize_rich_text};
pub use render::url::{parse_absolute_url, validate_absolute_url, UrlRejection};
pub use render::{render_card, RenderContext, RenderedFragment};
pub use service::collection_service::{
    begin_loading, render_collection, CollectionService, LoadOutcome,
};
pub use source::sqlite_source::SqliteRecordSource;
pub use source::static_source::StaticRecordSource;
pub use source::{CollectionQuery, RecordSource, SourceError, SourceResult};
pub use target::{HtmlContainer, RenderTarget};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

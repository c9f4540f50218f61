//! Collection rendering service.
//!
//! # Responsibility
//! - Paint the loading placeholder, fetch, then resolve the container to
//!   exactly one of: populated cards, the empty placeholder, or the failure
//!   placeholder.
//!
//! # Invariants
//! - Cards are appended in the order the source returned them.
//! - Once a pass resolves, the container never shows the loading state.
//! - Source failures are reported through `LoadOutcome`, never propagated.
//! - Log lines carry kinds, counts and durations only, never record content.

use crate::config::RenderOptions;
use crate::model::card::CardKind;
use crate::model::record::Record;
use crate::render::{render_card, RenderContext};
use crate::source::{CollectionQuery, RecordSource, SourceResult};
use crate::target::RenderTarget;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::time::Instant;

/// Final state of one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Number of cards appended.
    Populated(usize),
    Empty,
    Failed,
}

/// Paints the loading placeholder for `kind`.
pub fn begin_loading<T: RenderTarget + ?Sized>(target: &mut T, kind: CardKind) {
    target.replace_html(kind.placeholders().loading);
}

/// Resolves `target` from an already-fetched result.
pub fn render_collection<T: RenderTarget + ?Sized>(
    target: &mut T,
    kind: CardKind,
    fetched: SourceResult<Vec<Record>>,
    ctx: &RenderContext<'_>,
) -> LoadOutcome {
    let placeholders = kind.placeholders();
    let records = match fetched {
        Ok(records) => records,
        Err(err) => {
            error!(
                "event=collection_render module=service status=error kind={} error={}",
                kind.as_str(),
                err
            );
            target.replace_html(placeholders.failed);
            return LoadOutcome::Failed;
        }
    };

    if records.is_empty() {
        target.replace_html(placeholders.empty);
        return LoadOutcome::Empty;
    }

    target.clear();
    for (index, record) in records.iter().enumerate() {
        let fragment = render_card(record, kind, &ctx.at_index(index));
        target.append_html(fragment.as_str());
    }
    LoadOutcome::Populated(records.len())
}

/// Runs whole render passes against one record source.
pub struct CollectionService<S: RecordSource> {
    source: S,
    options: RenderOptions,
}

impl<S: RecordSource> CollectionService<S> {
    pub fn new(source: S, options: RenderOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Loads `kind` with its default query into `target`.
    ///
    /// Calling this again re-runs the whole pass; the last completed call
    /// determines the container content.
    pub fn load<T: RenderTarget + ?Sized>(
        &self,
        kind: CardKind,
        target: &mut T,
        now: DateTime<Utc>,
    ) -> LoadOutcome {
        self.load_with_query(kind, &CollectionQuery::for_kind(kind), target, now)
    }

    /// Same as `load`, with a caller-supplied collection query.
    pub fn load_with_query<T: RenderTarget + ?Sized>(
        &self,
        kind: CardKind,
        query: &CollectionQuery,
        target: &mut T,
        now: DateTime<Utc>,
    ) -> LoadOutcome {
        let started_at = Instant::now();
        info!(
            "event=collection_load module=service status=start kind={} table={}",
            kind.as_str(),
            query.table
        );

        begin_loading(target, kind);
        let fetched = self.source.fetch(query);
        let ctx = RenderContext::new(&self.options, now);
        let outcome = render_collection(target, kind, fetched, &ctx);

        let (status, count) = match outcome {
            LoadOutcome::Populated(count) => ("ok", count),
            LoadOutcome::Empty => ("empty", 0),
            LoadOutcome::Failed => ("error", 0),
        };
        info!(
            "event=collection_load module=service status={} kind={} count={} duration_ms={}",
            status,
            kind.as_str(),
            count,
            started_at.elapsed().as_millis()
        );
        outcome
    }
}

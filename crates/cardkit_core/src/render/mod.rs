//! Safe-rendering pipeline.
//!
//! # Responsibility
//! - Turn one untrusted `Record` into one trusted HTML fragment.
//! - Keep escaping, sanitization, URL validation and templating in one
//!   place so call sites cannot skip a step.
//!
//! # Invariants
//! - Rendering is pure: output depends only on the record, the card kind and
//!   the explicit `RenderContext`.
//! - Rendering never panics on record content and always yields a fragment.
//! - Fragments contain no `<script>`, `<style>`, `<iframe>` or `<link>`
//!   element and no inline event-handler attribute.

pub mod date;
pub mod escape;
pub mod sanitize;
pub mod schema;
pub mod templates;
pub mod url;

use crate::config::RenderOptions;
use crate::model::card::CardKind;
use crate::model::record::Record;
use chrono::{DateTime, Utc};
use schema::{schema_for, SafeFields};
use std::fmt::{Display, Formatter};

/// Per-call inputs that are not part of the record.
///
/// `index` is the record's position in its collection and `now` is the
/// reference instant for relative ages; both are passed in rather than read
/// from global state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
    pub now: DateTime<Utc>,
    pub index: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a RenderOptions, now: DateTime<Utc>) -> Self {
        Self {
            options,
            now,
            index: 0,
        }
    }

    /// Same context for the record at `index`.
    pub fn at_index(self, index: usize) -> Self {
        Self { index, ..self }
    }
}

/// Markup that is safe to mount without further escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFragment(String);

impl RenderedFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for RenderedFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderedFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Renders one record with the fixed template for `kind`.
pub fn render_card(record: &Record, kind: CardKind, ctx: &RenderContext<'_>) -> RenderedFragment {
    let fields = SafeFields::resolve(record, schema_for(kind));
    let html = match kind {
        CardKind::Event => templates::event_card(&fields, ctx),
        CardKind::Activity => templates::activity_card(&fields, ctx),
        CardKind::TeamMember => templates::team_member_card(&fields, ctx),
    };
    RenderedFragment(html)
}

//! Render targets: where fragments are mounted.

use crate::render::escape::escape_html;

/// An addressable container that can be cleared and appended to, in order.
pub trait RenderTarget {
    fn clear(&mut self);

    /// Appends trusted markup after the current content.
    fn append_html(&mut self, html: &str);

    /// Replaces the whole content with trusted markup.
    fn replace_html(&mut self, html: &str) {
        self.clear();
        self.append_html(html);
    }
}

/// In-memory container that accumulates markup as a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlContainer {
    id: String,
    html: String,
}

impl HtmlContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current inner markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Wraps the inner markup in a `<div>` carrying the container id.
    pub fn to_document_fragment(&self) -> String {
        format!(
            "<div id=\"{}\">\n{}</div>\n",
            escape_html(&self.id),
            self.html
        )
    }
}

impl RenderTarget for HtmlContainer {
    fn clear(&mut self) {
        self.html.clear();
    }

    fn append_html(&mut self, html: &str) {
        self.html.push_str(html);
    }
}

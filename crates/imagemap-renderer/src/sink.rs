//! Output sinks.
//!
//! A sink is where the host writes the rendered fragment. Not every host
//! output format accepts raw HTML; [`OutputSink::supports_raw_html`] makes
//! that capability explicit instead of probing with a failed write.

use crate::error::ParseError;
use crate::util::escape_html;

/// Destination for rendered output.
pub trait OutputSink {
    /// Whether [`raw_html`](Self::raw_html) is available.
    fn supports_raw_html(&self) -> bool;

    /// Write HTML verbatim.
    fn raw_html(&mut self, html: &str);

    /// Write plain text, escaped for the sink's format.
    fn escaped_text(&mut self, text: &str);
}

/// What [`ImageMapRenderer::format`](crate::ImageMapRenderer::format) wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The full HTML fragment was written.
    Rendered,
    /// The document was valid but the sink only accepts text, so a
    /// placeholder line was written instead.
    Degraded,
    /// The document was invalid; a single error line was written.
    Failed(ParseError),
}

impl FormatOutcome {
    /// Whether the document built successfully.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// In-memory sink.
///
/// # Example
///
/// ```
/// use imagemap_renderer::{OutputSink, StringSink};
///
/// let mut sink = StringSink::text();
/// assert!(!sink.supports_raw_html());
/// sink.escaped_text("<b>");
/// assert_eq!(sink.as_str(), "&lt;b&gt;");
/// ```
#[derive(Debug, Default, Clone)]
pub struct StringSink {
    raw_html: bool,
    buf: String,
}

impl StringSink {
    /// A sink that accepts raw HTML.
    #[must_use]
    pub fn html() -> Self {
        Self {
            raw_html: true,
            buf: String::new(),
        }
    }

    /// A sink that only accepts escaped text.
    #[must_use]
    pub fn text() -> Self {
        Self {
            raw_html: false,
            buf: String::new(),
        }
    }

    /// Written output.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the sink and return its output.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl OutputSink for StringSink {
    fn supports_raw_html(&self) -> bool {
        self.raw_html
    }

    fn raw_html(&mut self, html: &str) {
        if self.raw_html {
            self.buf.push_str(html);
        } else {
            self.escaped_text(html);
        }
    }

    fn escaped_text(&mut self, text: &str) {
        self.buf.push_str(&escape_html(text));
    }
}

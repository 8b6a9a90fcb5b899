//! Interactive image map renderer.
//!
//! Parses an image map markup block (one image line followed by area lines)
//! into a validated [`Document`] and serializes it into an HTML fragment with
//! tooltips and a click-driven description panel.
//!
//! # Architecture
//!
//! - [`Record`]: decodes one `name;;key=value;;…` line
//! - [`Document::parse`]: validates the image and areas, resolving
//!   attachments through an [`ImageResolver`]
//! - [`Document::render_descriptions`]: renders area descriptions through a
//!   [`MarkupRenderer`] ([`MarkdownMarkup`] by default)
//! - [`render_document`]: serializes the document using [`TemplateOptions`]
//! - [`ImageMapRenderer`]: ties the steps together and writes to an
//!   [`OutputSink`]
//!
//! # Example
//!
//! ```
//! use imagemap_renderer::{ImageMapRenderer, MarkdownMarkup, ParseError, ResolvedImage};
//!
//! let resolver = |name: &str, _page: &str| ResolvedImage::found(format!("/files/{name}"));
//! let markup = MarkdownMarkup::new();
//! let renderer = ImageMapRenderer::new(&resolver, &markup);
//!
//! let err = renderer.build("pic.png;;width=300", "Home").unwrap_err();
//! assert_eq!(err, ParseError::MissingImageOrAreaLine);
//! ```

mod builder;
mod error;
mod html;
mod markup;
mod model;
mod record;
mod resolver;
mod sink;
mod util;

pub use builder::{AREA_ATTRIBUTES, ImageMapRenderer, is_url};
pub use error::{PARSER_NAME, ParseError};
pub use html::{
    DEFAULT_DESCRIPTION, DEFAULT_JQUERY_URL, DEFAULT_MAPSTER_URL, HighlightStyle, TemplateOptions,
    render_document,
};
pub use markup::{BR_MARKER, ESCAPED_BR_MARKER, MarkdownMarkup, collapse_lines};
pub use model::{Area, Document, Image, derive_id};
pub use record::{FIELD_SEPARATOR, KEY_VALUE_SEPARATOR, NAME_KEY, Record};
pub use resolver::{ImageResolver, MarkupRenderer, ResolvedImage};
pub use sink::{FormatOutcome, OutputSink, StringSink};
pub use util::escape_html;

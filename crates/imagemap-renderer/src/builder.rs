//! Document builder.
//!
//! Turns a raw markup block into a validated [`Document`] and then into HTML:
//!
//! ```text
//! picsrc;;width=WIDTH
//! area1;;shape=SHAPE;;coords=V1,V2,...;;tooltip=TOOLTIP;;description=DESCRIPTION
//! area2;;...
//! ```
//!
//! The first line describes the image, every further line one area. The
//! first defect stops the build.

use crate::error::{PARSER_NAME, ParseError};
use crate::html::{TemplateOptions, render_document};
use crate::markup::{BR_MARKER, ESCAPED_BR_MARKER};
use crate::model::{Area, Document, Image, derive_id};
use crate::record::Record;
use crate::resolver::{ImageResolver, MarkupRenderer};
use crate::sink::{FormatOutcome, OutputSink};
use crate::util::escape_html;

/// Attributes every area line must carry.
pub const AREA_ATTRIBUTES: [&str; 4] = ["shape", "coords", "tooltip", "description"];

/// Whether an image name is a URL rather than an attachment name.
#[must_use]
pub fn is_url(name: &str) -> bool {
    name.contains("://")
}

impl Document {
    /// Parse and validate a markup block.
    ///
    /// Attachment names are resolved against `page` through `resolver`.
    /// Descriptions are left as escaped markup; see
    /// [`render_descriptions`](Self::render_descriptions).
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found.
    pub fn parse(
        raw: &str,
        page: &str,
        resolver: &dyn ImageResolver,
    ) -> Result<Self, ParseError> {
        let lines: Vec<&str> = raw.lines().collect();
        let [image_line, area_lines @ ..] = lines.as_slice() else {
            return Err(ParseError::MissingImageOrAreaLine);
        };
        if area_lines.is_empty() {
            return Err(ParseError::MissingImageOrAreaLine);
        }

        let image = parse_image(image_line, page, resolver)?;
        let mut doc = Self::new(image);

        for (idx, line) in area_lines.iter().enumerate() {
            // Line numbers are 1-based and the image line comes first.
            let area = parse_area(line, idx + 2)?;
            if doc.areas.contains_key(&area.name) {
                tracing::debug!(area = %area.name, "Duplicate area name, later line wins");
            }
            doc.insert_area(area);
        }

        tracing::debug!(image = %doc.image.id, areas = doc.len(), "Parsed image map");
        Ok(doc)
    }

    /// Replace every area description with its rendered HTML.
    ///
    /// The escaped line-break marker is restored before the text is handed
    /// to `markup`.
    pub fn render_descriptions(&mut self, markup: &dyn MarkupRenderer) {
        for area in self.areas.values_mut() {
            let text = area.description.replace(ESCAPED_BR_MARKER, BR_MARKER);
            area.description = markup.render(&text);
        }
    }
}

fn parse_image(line: &str, page: &str, resolver: &dyn ImageResolver) -> Result<Image, ParseError> {
    let mut record = Record::decode(line);
    tracing::debug!(?record, "Decoded image line");

    let name = record.take_name().ok_or(ParseError::MalformedImageLine)?;

    let src = if is_url(&name) {
        name.clone()
    } else {
        let resolved = resolver.resolve(&name, page);
        tracing::debug!(name = %name, page, url = %resolved.url, exists = resolved.exists, "Resolved attachment");
        if !resolved.exists {
            return Err(ParseError::AttachmentNotFound { name });
        }
        escape_html(&resolved.url)
    };

    let id = derive_id(&name);
    let width = record.take("width").ok_or(ParseError::MissingWidth)?;

    if !record.is_empty() {
        return Err(ParseError::ExcessImageArguments {
            keys: record.keys().into_iter().map(str::to_owned).collect(),
        });
    }

    Ok(Image {
        name,
        src,
        width,
        id,
    })
}

fn parse_area(line: &str, line_no: usize) -> Result<Area, ParseError> {
    let mut record = Record::decode(line);
    tracing::debug!(line = line_no, ?record, "Decoded area line");

    let name = record
        .take_name()
        .ok_or(ParseError::MalformedAreaLine { line: line_no })?;

    let mut require = |attr: &'static str| {
        record
            .take(attr)
            .ok_or_else(|| ParseError::MissingAreaAttribute {
                attr,
                area: name.clone(),
            })
    };
    let shape = require("shape")?;
    let coords = require("coords")?;
    let tooltip = require("tooltip")?;
    let description = require("description")?;

    if !record.is_empty() {
        tracing::debug!(area = %name, ignored = ?record.keys(), "Ignoring extra area attributes");
    }

    Ok(Area {
        name,
        shape,
        coords,
        tooltip,
        description,
    })
}

/// Renders image map blocks using injected collaborators.
///
/// # Example
///
/// ```
/// use imagemap_renderer::{ImageMapRenderer, MarkdownMarkup, ResolvedImage};
///
/// let resolver = |name: &str, page: &str| ResolvedImage::found(format!("/{page}/{name}"));
/// let markup = MarkdownMarkup::new();
/// let renderer = ImageMapRenderer::new(&resolver, &markup);
///
/// let html = renderer
///     .build("pic.png;;width=300\nzoneA;;shape=rect;;coords=0,0,10,10;;tooltip=Zone A;;description=Hello", "Home")
///     .unwrap();
/// assert!(html.contains(r#"<img id="picpng" src="/Home/pic.png""#));
/// ```
pub struct ImageMapRenderer<'a> {
    resolver: &'a dyn ImageResolver,
    markup: &'a dyn MarkupRenderer,
    options: TemplateOptions,
    parser_name: String,
}

impl<'a> ImageMapRenderer<'a> {
    /// Create a renderer with the default template.
    #[must_use]
    pub fn new(resolver: &'a dyn ImageResolver, markup: &'a dyn MarkupRenderer) -> Self {
        Self {
            resolver,
            markup,
            options: TemplateOptions::default(),
            parser_name: PARSER_NAME.to_owned(),
        }
    }

    /// Set the template options.
    #[must_use]
    pub fn with_options(mut self, options: TemplateOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the name used in error reports.
    #[must_use]
    pub fn with_parser_name(mut self, name: impl Into<String>) -> Self {
        self.parser_name = name.into();
        self
    }

    /// Template options in use.
    #[must_use]
    pub fn options(&self) -> &TemplateOptions {
        &self.options
    }

    /// Parse, validate and render descriptions, without serializing.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found.
    pub fn parse(&self, raw: &str, page: &str) -> Result<Document, ParseError> {
        let mut doc = Document::parse(raw, page, self.resolver)?;
        doc.render_descriptions(self.markup);
        Ok(doc)
    }

    /// Build the HTML fragment for a markup block.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found; no partial HTML is produced.
    pub fn build(&self, raw: &str, page: &str) -> Result<String, ParseError> {
        let doc = self.parse(raw, page)?;
        Ok(render_document(&doc, &self.options))
    }

    /// Build a markup block and write the result to `sink`.
    ///
    /// Errors are written as one report line. A valid document written to a
    /// sink without raw HTML support degrades to a one-line placeholder.
    pub fn format(&self, raw: &str, page: &str, sink: &mut dyn OutputSink) -> FormatOutcome {
        let doc = match self.parse(raw, page) {
            Ok(doc) => doc,
            Err(err) => {
                let report = err.report(&self.parser_name);
                tracing::debug!(error = %err, page, "Image map rejected");
                if sink.supports_raw_html() {
                    sink.raw_html(&report);
                } else {
                    sink.escaped_text(&report);
                }
                return FormatOutcome::Failed(err);
            }
        };

        if sink.supports_raw_html() {
            sink.raw_html(&render_document(&doc, &self.options));
            FormatOutcome::Rendered
        } else {
            tracing::warn!(
                image = %doc.image.id,
                page,
                "Output format does not accept raw HTML, writing placeholder"
            );
            sink.escaped_text(&format!("[image map {}: {} areas]", doc.image.id, doc.len()));
            FormatOutcome::Degraded
        }
    }
}

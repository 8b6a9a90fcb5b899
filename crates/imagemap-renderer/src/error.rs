//! Build errors.

/// Name reported in front of every error message.
pub const PARSER_NAME: &str = "InteractiveImageMap";

/// Error raised while building an image map document.
///
/// Every variant is terminal: the first defect stops the build and no
/// partial HTML is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Fewer than two lines (an image line and at least one area line).
    #[error("Either picsrc or area line is missing")]
    MissingImageOrAreaLine,

    /// The image line has a clause without exactly one `=`.
    #[error("picsrc line is malformed")]
    MalformedImageLine,

    /// The image line lacks `width`.
    #[error("width missing from picsrc line")]
    MissingWidth,

    /// The image line has attributes other than `name` and `width`.
    #[error("picsrc contains excess arguments: {}", .keys.join(", "))]
    ExcessImageArguments {
        /// Unexpected keys, sorted.
        keys: Vec<String>,
    },

    /// The image names an attachment that does not exist.
    #[error("{name} not attached to this page")]
    AttachmentNotFound {
        /// Attachment name as written in the markup (escaped).
        name: String,
    },

    /// An area line has a clause without exactly one `=`.
    #[error("area line {line} is malformed")]
    MalformedAreaLine {
        /// 1-based line number within the block.
        line: usize,
    },

    /// An area line lacks one of `shape`, `coords`, `tooltip`, `description`.
    #[error("{attr} missing from {area} line")]
    MissingAreaAttribute {
        /// Missing attribute name.
        attr: &'static str,
        /// Area name.
        area: String,
    },
}

impl ParseError {
    /// Format the single-line report shown to readers:
    /// `"<parser-name> ERROR: <message>"`.
    ///
    /// # Example
    ///
    /// ```
    /// use imagemap_renderer::{PARSER_NAME, ParseError};
    ///
    /// assert_eq!(
    ///     ParseError::MissingWidth.report(PARSER_NAME),
    ///     "InteractiveImageMap ERROR: width missing from picsrc line"
    /// );
    /// ```
    #[must_use]
    pub fn report(&self, parser_name: &str) -> String {
        format!("{parser_name} ERROR: {self}")
    }
}

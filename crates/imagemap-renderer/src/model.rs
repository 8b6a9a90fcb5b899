//! Validated document model.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// Characters that never appear in a derived element id.
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Derive the DOM id (and map name) of an image from its name.
///
/// Every character outside `[A-Za-z0-9_]` is removed. Distinct names may
/// collapse to the same id; callers keep image names distinct per page.
///
/// # Example
///
/// ```
/// use imagemap_renderer::derive_id;
///
/// assert_eq!(derive_id("my pic.png"), "mypicpng");
/// ```
#[must_use]
pub fn derive_id(name: &str) -> String {
    NON_WORD_RE.replace_all(name, "").into_owned()
}

/// The single picture of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Image {
    /// Image name as written (URL or attachment name), escaped.
    pub name: String,
    /// Value of the `src` attribute, escaped.
    pub src: String,
    /// Width as written, not interpreted.
    pub width: String,
    /// Element id and map name, see [`derive_id`].
    pub id: String,
}

/// One clickable region of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Area {
    /// Area name, unique within a document.
    pub name: String,
    /// Shape keyword (`rect`, `circle`, `poly`), passed through unchecked.
    pub shape: String,
    /// Comma-separated coordinates, passed through unchecked.
    pub coords: String,
    /// Tooltip text, escaped.
    pub tooltip: String,
    /// Description markup, replaced by rendered HTML before serialization.
    pub description: String,
}

/// One image plus its areas in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    /// The image.
    pub image: Image,
    /// Areas keyed by name.
    pub areas: IndexMap<String, Area>,
}

impl Document {
    /// Create a document without areas.
    #[must_use]
    pub fn new(image: Image) -> Self {
        Self {
            image,
            areas: IndexMap::new(),
        }
    }

    /// Insert an area.
    ///
    /// An area whose name is already present replaces the earlier one but
    /// keeps its position.
    pub fn insert_area(&mut self, area: Area) {
        self.areas.insert(area.name.clone(), area);
    }

    /// Area names in document order.
    pub fn area_names(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(String::as_str)
    }

    /// Number of areas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the document has no areas.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

//! Filesystem attachment store for imagemap.
//!
//! [`FsAttachments`] resolves attachment names against a directory laid out
//! as one subdirectory per page:
//!
//! ```text
//! attachments/
//! ├── Home/
//! │   └── map.png
//! └── Docs/
//!     └── Guide/
//!         └── plan.png
//! ```
//!
//! # Example
//!
//! ```ignore
//! use imagemap_renderer::{ImageMapRenderer, MarkdownMarkup};
//! use imagemap_storage_fs::FsAttachments;
//!
//! let attachments = FsAttachments::new("attachments", "/attachments");
//! let markup = MarkdownMarkup::new();
//! let renderer = ImageMapRenderer::new(&attachments, &markup);
//! let html = renderer.build(&block, "Home")?;
//! ```

mod name;

use std::path::{Path, PathBuf};

use imagemap_renderer::{ImageResolver, ResolvedImage};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub use name::AttachmentRef;

/// Characters escaped in URL path segments (RFC 3986 unreserved are kept).
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Attachments stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsAttachments {
    dir: PathBuf,
    url_prefix: String,
}

impl FsAttachments {
    /// Create a store rooted at `dir`, served under `url_prefix`.
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            url_prefix: url_prefix.into(),
        }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Backing file of an attachment.
    #[must_use]
    pub fn path(&self, attachment: &AttachmentRef) -> PathBuf {
        let mut path = self.dir.clone();
        path.extend(&attachment.page);
        path.push(&attachment.file);
        path
    }

    /// Public URL of an attachment.
    #[must_use]
    pub fn url(&self, attachment: &AttachmentRef) -> String {
        let mut url = self.url_prefix.trim_end_matches('/').to_owned();
        for segment in attachment.page.iter().chain(Some(&attachment.file)) {
            url.push('/');
            url.extend(utf8_percent_encode(segment, SEGMENT_ENCODE_SET));
        }
        url
    }
}

impl ImageResolver for FsAttachments {
    fn resolve(&self, name: &str, page: &str) -> ResolvedImage {
        let Some(attachment) = AttachmentRef::resolve(name, page) else {
            tracing::debug!(name, page, "Attachment name does not resolve to a page");
            return ResolvedImage::missing(String::new());
        };

        let path = self.path(&attachment);
        let url = self.url(&attachment);
        let exists = path.is_file();
        tracing::debug!(name, page, path = %path.display(), exists, "Looked up attachment");

        if exists {
            ResolvedImage::found(url)
        } else {
            ResolvedImage::missing(url)
        }
    }
}

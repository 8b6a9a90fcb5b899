//! Collaborators consumed by the builder.
//!
//! The builder never touches the filesystem or parses nested markup itself.
//! Both concerns are injected: [`ImageResolver`] maps attachment names to URLs
//! and [`MarkupRenderer`] renders description text. Closures implement both
//! traits, which keeps tests and host glue small:
//!
//! ```
//! use imagemap_renderer::{ImageResolver, MarkupRenderer, ResolvedImage};
//!
//! let resolver = |name: &str, page: &str| ResolvedImage::found(format!("/{page}/{name}"));
//! assert_eq!(resolver.resolve("pic.png", "Home").url, "/Home/pic.png");
//!
//! let markup = |text: &str| format!("<p>{text}</p>");
//! assert_eq!(markup.render("hi"), "<p>hi</p>");
//! ```

/// Result of resolving an attachment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// URL the browser can fetch the image from.
    pub url: String,
    /// Whether the backing file is present.
    pub exists: bool,
}

impl ResolvedImage {
    /// An attachment that exists at `url`.
    #[must_use]
    pub fn found(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            exists: true,
        }
    }

    /// An attachment whose backing file is absent.
    #[must_use]
    pub fn missing(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            exists: false,
        }
    }
}

/// Resolves a logical attachment name on a page to a fetchable URL.
pub trait ImageResolver {
    /// Resolve `name` relative to the page called `page`.
    fn resolve(&self, name: &str, page: &str) -> ResolvedImage;
}

impl<F> ImageResolver for F
where
    F: Fn(&str, &str) -> ResolvedImage,
{
    fn resolve(&self, name: &str, page: &str) -> ResolvedImage {
        self(name, page)
    }
}

/// Renders description markup to single-line HTML.
pub trait MarkupRenderer {
    /// Render `text`. The result must not contain newlines.
    fn render(&self, text: &str) -> String;
}

impl<F> MarkupRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, text: &str) -> String {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_image_constructors() {
        assert!(ResolvedImage::found("/a.png").exists);
        assert!(!ResolvedImage::missing("/a.png").exists);
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |name: &str, _page: &str| ResolvedImage::missing(name.to_owned());
        let resolved = resolver.resolve("pic.png", "Home");
        assert_eq!(resolved, ResolvedImage::missing("pic.png"));
    }

    #[test]
    fn test_trait_object_markup() {
        let upper = |text: &str| text.to_uppercase();
        let markup: &dyn MarkupRenderer = &upper;
        assert_eq!(markup.render("abc"), "ABC");
    }
}

//! Default description renderer backed by pulldown-cmark.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::resolver::MarkupRenderer;

/// Line-break directive accepted inside descriptions.
pub const BR_MARKER: &str = "<<BR>>";

/// [`BR_MARKER`] as it appears after the line decoder escaped it.
pub const ESCAPED_BR_MARKER: &str = "&lt;&lt;BR&gt;&gt;";

/// URL schemes allowed in link and image targets.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renders descriptions as Markdown.
///
/// [`BR_MARKER`] becomes a hard line break and the output is collapsed onto
/// a single line. Link and image targets with a scheme outside
/// `http`, `https` and `mailto` are emptied; relative and fragment targets
/// are kept.
///
/// # Example
///
/// ```
/// use imagemap_renderer::{MarkdownMarkup, MarkupRenderer};
///
/// let markup = MarkdownMarkup::new();
/// assert_eq!(markup.render("**Hello**<<BR>>world"), "<p><strong>Hello</strong><br />world</p>");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MarkdownMarkup {
    gfm: bool,
}

impl Default for MarkdownMarkup {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownMarkup {
    /// Create a renderer with GitHub Flavored Markdown enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }
}

impl MarkupRenderer for MarkdownMarkup {
    fn render(&self, text: &str) -> String {
        let source = text.replace(BR_MARKER, "<br />");
        let parser = Parser::new_ext(&source, self.parser_options()).map(neutralize_unsafe_target);

        let mut out = String::with_capacity(source.len() + 16);
        html::push_html(&mut out, parser);
        collapse_lines(&out)
    }
}

fn neutralize_unsafe_target(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_target(&dest_url) => {
            tracing::debug!(url = %dest_url, "Dropping link target with disallowed scheme");
            Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::Borrowed(""),
                title,
                id,
            })
        }
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_target(&dest_url) => {
            tracing::debug!(url = %dest_url, "Dropping image target with disallowed scheme");
            Event::Start(Tag::Image {
                link_type,
                dest_url: CowStr::Borrowed(""),
                title,
                id,
            })
        }
        other => other,
    }
}

/// Whether a link target is relative or uses an allowed scheme.
///
/// Whitespace and control characters are ignored, as browsers do when
/// reading a scheme.
fn is_safe_target(url: &str) -> bool {
    let url: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    match url.find([':', '/', '?', '#']) {
        Some(pos) if url[pos..].starts_with(':') => ALLOWED_SCHEMES
            .iter()
            .any(|scheme| url[..pos].eq_ignore_ascii_case(scheme)),
        _ => true,
    }
}

/// Join all lines of `html` with single spaces.
///
/// Lines are trimmed on both ends and blank lines are dropped, so the result
/// has no leading or trailing whitespace.
#[must_use]
pub fn collapse_lines(html: &str) -> String {
    html.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_paragraph() {
        assert_eq!(MarkdownMarkup::new().render("Hello"), "<p>Hello</p>");
    }

    #[test]
    fn test_render_inline_formatting() {
        assert_eq!(
            MarkdownMarkup::new().render("*a* and `b`"),
            "<p><em>a</em> and <code>b</code></p>"
        );
    }

    #[test]
    fn test_render_line_break_marker() {
        assert_eq!(
            MarkdownMarkup::new().render("first<<BR>>second"),
            "<p>first<br />second</p>"
        );
    }

    #[test]
    fn test_render_keeps_escaped_html_inert() {
        assert_eq!(
            MarkdownMarkup::new().render("&lt;script&gt;"),
            "<p>&lt;script&gt;</p>"
        );
    }

    #[test]
    fn test_render_is_single_line() {
        let html = MarkdownMarkup::new().render("- one\n- two");
        assert!(!html.contains('\n'));
        assert!(html.starts_with("<ul>"));
    }

    #[test]
    fn test_render_link() {
        assert_eq!(
            MarkdownMarkup::new().render("[docs](https://example.com)"),
            r#"<p><a href="https://example.com">docs</a></p>"#
        );
    }

    #[test]
    fn test_render_rejects_javascript_link() {
        assert_eq!(
            MarkdownMarkup::new().render("[click](javascript:alert(document.cookie))"),
            r#"<p><a href="">click</a></p>"#
        );
        assert!(
            !MarkdownMarkup::new()
                .render("[x](JavaScript:alert(1))")
                .to_lowercase()
                .contains("javascript:")
        );
    }

    #[test]
    fn test_render_rejects_entity_encoded_scheme() {
        let html = MarkdownMarkup::new().render("[x](java&#115;cript:alert(1))");
        assert!(!html.contains("javascript:"), "{html}");
        assert!(!html.contains("script:alert"), "{html}");
    }

    #[test]
    fn test_render_rejects_data_image() {
        let html = MarkdownMarkup::new().render("![pic](data:image/svg+xml;base64,AAAA)");
        assert!(!html.contains("data:"), "{html}");
        assert!(html.contains(r#"alt="pic""#), "{html}");
    }

    #[test]
    fn test_render_keeps_safe_targets() {
        let markup = MarkdownMarkup::new();
        assert!(
            markup
                .render("[a](mailto:team@example.com)")
                .contains(r#"href="mailto:team"#)
        );
        assert!(
            markup
                .render("[a](/Other/Page)")
                .contains(r#"href="/Other/Page""#)
        );
        assert!(markup.render("[a](#part)").contains(r##"href="#part""##));
        assert!(
            markup
                .render("[a](page?x=a:b)")
                .contains(r#"href="page?x=a:b""#)
        );
    }

    #[test]
    fn test_is_safe_target() {
        assert!(is_safe_target("https://example.com"));
        assert!(is_safe_target("HTTP://example.com"));
        assert!(is_safe_target("relative/path:with-colon"));
        assert!(!is_safe_target("javascript:alert(1)"));
        assert!(!is_safe_target("java\tscript:alert(1)"));
        assert!(!is_safe_target(" javascript:alert(1)"));
        assert!(!is_safe_target("vbscript:msgbox"));
        assert!(!is_safe_target("data:text/html,x"));
    }

    #[test]
    fn test_collapse_lines_trims_both_ends() {
        assert_eq!(
            collapse_lines("  <ul>\n   <li>a</li>\n\n</ul>\n"),
            "<ul> <li>a</li> </ul>"
        );
    }

    #[test]
    fn test_strikethrough_requires_gfm() {
        assert!(MarkdownMarkup::new().render("~~x~~").contains("<del>"));
        assert!(
            !MarkdownMarkup::new()
                .with_gfm(false)
                .render("~~x~~")
                .contains("<del>")
        );
    }

    #[test]
    fn test_collapse_lines() {
        assert_eq!(collapse_lines("<p>a</p>\n<p>b</p>\n"), "<p>a</p> <p>b</p>");
        assert_eq!(collapse_lines("a\r\nb"), "a b");
        assert_eq!(collapse_lines(""), "");
    }
}

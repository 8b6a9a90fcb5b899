//! Escaping helpers shared by the decoder and the serializer.

/// Escape text for embedding in HTML element content or attribute values.
///
/// Single quotes are escaped too, so the result is also safe inside a
/// single-quoted script literal.
///
/// # Examples
///
/// ```
/// use imagemap_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & 'c'"), "a &lt; b &amp; &#x27;c&#x27;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text for a single-quoted script string literal.
///
/// `</` is split so rendered markup can never close the surrounding
/// `<script>` element.
pub(crate) fn escape_js_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\'' => result.push_str("\\'"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '<' if chars.peek() == Some(&'/') => result.push_str("<\\"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a script object key, quoting it unless it is a plain identifier.
pub(crate) fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if is_ident {
        key.to_owned()
    } else {
        format!("'{}'", escape_js_string(key))
    }
}

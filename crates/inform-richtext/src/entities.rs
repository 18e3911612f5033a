//! HTML entity helpers.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Character references that browsers also accept without the trailing `;`.
static UNTERMINATED_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"&(#[0-9]+|#[xX][0-9a-fA-F]+|amp|AMP|lt|LT|gt|GT|quot|QUOT|nbsp|copy|COPY|reg|REG)(;?)",
    )
    .expect("invalid entity regex")
});

/// Decode every HTML entity (named and numeric) in `html`.
///
/// Legacy exports escape the quotes inside shortcode attributes
/// (`[addlink label=&quot;x&quot;]`), so shortcode rewriters decode the
/// document before parsing. Numeric references and the common legacy names
/// (`&amp`, `&quot`, `&nbsp` ...) decode even without their semicolon.
pub fn unescape_html(html: &str) -> Cow<'_, str> {
    if !html.contains('&') {
        return Cow::Borrowed(html);
    }

    let terminated = UNTERMINATED_ENTITY.replace_all(html, |caps: &Captures<'_>| {
        if caps[2].is_empty() {
            format!("&{};", &caps[1])
        } else {
            caps[0].to_owned()
        }
    });
    if let Cow::Owned(decoded) = html_escape::decode_html_entities(&terminated) {
        return Cow::Owned(decoded);
    }
    terminated
}

/// Escape a value for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Undo the minimal escaping applied to stored tag attributes.
pub(crate) fn unescape_attribute(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_quotes() {
        assert_eq!(
            unescape_html("[addlink label=&quot;Read&quot;]"),
            r#"[addlink label="Read"]"#
        );
    }

    #[test]
    fn test_unescape_numeric_and_named() {
        assert_eq!(unescape_html("it&#39;s &amp; that&nbsp;"), "it's & that\u{a0}");
    }

    #[test]
    fn test_unescape_without_semicolon() {
        assert_eq!(
            unescape_html("a &amp b &quot x&quot; &#39 y &#x27z"),
            "a & b \" x\" ' y 'z"
        );
        assert_eq!(unescape_html("fish&chips &ampx"), "fish&chips &x");
    }

    #[test]
    fn test_unescape_without_entities_borrows() {
        assert!(matches!(unescape_html("<p>plain</p>"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute(r#"a "b" & c"#), "a &quot;b&quot; &amp; c");
    }

    #[test]
    fn test_unescape_attribute_order() {
        // `&amp;lt;` must decode to the literal text `&lt;`
        assert_eq!(unescape_attribute("&amp;lt;"), "&lt;");
        assert_eq!(unescape_attribute("a &quot;b&quot;"), r#"a "b""#);
    }
}

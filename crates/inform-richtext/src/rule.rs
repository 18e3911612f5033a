//! Rewrite rule trait and the simple built-in rules.

use std::borrow::Cow;

/// One stage of the rewrite pipeline.
///
/// A rule receives the whole document and returns the whole document.
/// Returning [`Cow::Borrowed`] signals "no change".
pub trait RewriteRule: Send + Sync {
    /// Rule name for diagnostics.
    fn name(&self) -> &str;

    /// Rewrite `html`.
    fn rewrite<'a>(&self, html: &'a str) -> Cow<'a, str>;
}

/// Converts every literal newline to `<br />`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NewlineToBr;

impl RewriteRule for NewlineToBr {
    fn name(&self) -> &'static str {
        "newline_to_br"
    }

    fn rewrite<'a>(&self, html: &'a str) -> Cow<'a, str> {
        if html.contains('\n') {
            Cow::Owned(html.replace('\n', "<br />"))
        } else {
            Cow::Borrowed(html)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newline_to_br() {
        assert_eq!(NewlineToBr.rewrite("line1\nline2"), "line1<br />line2");
        assert_eq!(NewlineToBr.rewrite("a\n\nb\n"), "a<br /><br />b<br />");
    }

    #[test]
    fn test_no_newline_borrows() {
        assert!(matches!(NewlineToBr.rewrite("<p>x</p>"), Cow::Borrowed(_)));
    }
}

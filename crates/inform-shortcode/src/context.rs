//! Shortcode invocation context.

/// Context provided to shortcode handlers.
///
/// Created by [`ShortcodeParser`](crate::ShortcodeParser) for each directive
/// and used mainly for diagnostics.
///
/// # Example
///
/// ```
/// use inform_shortcode::ShortcodeContext;
///
/// let input = "first line\n[caption]x[/caption]";
/// let ctx = ShortcodeContext::new("caption", input, 11);
/// assert_eq!(ctx.line, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcodeContext<'a> {
    /// Tag name as written in the source.
    pub name: &'a str,
    /// Byte offset of the opening tag in the parsed input.
    pub offset: usize,
    /// Line of the opening tag (1-indexed).
    pub line: usize,
}

impl<'a> ShortcodeContext<'a> {
    /// Create a context for a tag starting at `offset` in `input`.
    #[must_use]
    pub fn new(name: &'a str, input: &str, offset: usize) -> Self {
        let line = input
            .get(..offset)
            .map_or(1, |before| before.matches('\n').count() + 1);
        Self { name, offset, line }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let ctx = ShortcodeContext::new("addlink", "[addlink]", 0);
        assert_eq!(ctx.line, 1);
        assert_eq!(ctx.offset, 0);
        assert_eq!(ctx.name, "addlink");
    }

    #[test]
    fn test_later_line() {
        let input = "a\nb\n[x]";
        let ctx = ShortcodeContext::new("x", input, 4);
        assert_eq!(ctx.line, 3);
    }
}

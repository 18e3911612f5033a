//! `[caption]<img ...> Text[/caption]`: an image with a caption.
//!
//! The `id`, `align` and `width` attributes written by WordPress are accepted
//! and ignored. The caption text is whatever follows the last `>`.

use std::sync::LazyLock;

use inform_shortcode::{ShortcodeArgs, ShortcodeContext, ShortcodeHandler, ValidationError};
use regex::Regex;

/// Markup ending in `>` followed by trailing caption text.
static CAPTION_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+>)([^>]+)$").expect("invalid caption regex"));

/// Split caption content into markup and caption, and wrap it in a `<figure>`.
///
/// Returns `None` when the content has no trailing text after its last tag.
#[must_use]
pub fn render_figure(content: &str) -> Option<String> {
    let caps = CAPTION_CONTENT.captures(content)?;
    let markup = caps.get(1)?.as_str();
    let caption = caps.get(2)?.as_str().trim();

    Some(format!(
        "<figure>\n  {markup}\n  <figcaption>{caption}</figcaption>\n</figure>"
    ))
}

/// Handler for the `caption` block shortcode.
#[derive(Debug, Default, Clone, Copy)]
pub struct CaptionHandler;

impl ShortcodeHandler for CaptionHandler {
    fn name(&self) -> &'static str {
        "caption"
    }

    fn end_name(&self) -> Option<&str> {
        Some("/caption")
    }

    fn render(
        &self,
        _args: &ShortcodeArgs,
        ctx: &ShortcodeContext<'_>,
        content: Option<&str>,
    ) -> Result<String, ValidationError> {
        let content = content.unwrap_or_default();

        Ok(render_figure(content).unwrap_or_else(|| {
            tracing::warn!(
                line = ctx.line,
                offset = ctx.offset,
                "Caption content has no trailing text, leaving it unchanged"
            );
            content.to_owned()
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_figure() {
        assert_eq!(
            render_figure(r#"<img src="a.png">A caption"#).unwrap(),
            "<figure>\n  <img src=\"a.png\">\n  <figcaption>A caption</figcaption>\n</figure>"
        );
    }

    #[test]
    fn test_caption_is_trimmed() {
        let html = render_figure("<img src=\"a.png\" />   Photo: someone  ").unwrap();
        assert!(html.contains("<figcaption>Photo: someone</figcaption>"));
        assert!(html.contains("  <img src=\"a.png\" />\n"));
    }

    #[test]
    fn test_greedy_markup_group() {
        // Everything up to the last `>` is markup
        let html = render_figure(r#"<a href="x"><img src="a.png"></a>Caption"#).unwrap();
        assert!(html.contains(r#"  <a href="x"><img src="a.png"></a>"#));
        assert!(html.contains("<figcaption>Caption</figcaption>"));
    }

    #[test]
    fn test_no_trailing_text() {
        assert_eq!(render_figure(r#"<img src="a.png">"#), None);
    }

    #[test]
    fn test_no_markup() {
        assert_eq!(render_figure("just text"), None);
        assert_eq!(render_figure(""), None);
    }

    #[test]
    fn test_markup_must_be_on_first_line() {
        assert_eq!(render_figure("text\n<img src=\"a.png\">caption"), None);
    }

    #[test]
    fn test_caption_may_span_lines() {
        let html = render_figure("<img src=\"a.png\">\nline one\nline two\n").unwrap();
        assert!(html.contains("<figcaption>line one\nline two</figcaption>"));
    }

    #[test]
    fn test_handler_leaves_malformed_content() {
        let ctx = ShortcodeContext::new("caption", "", 0);
        let args = ShortcodeArgs::default();
        let out = CaptionHandler
            .render(&args, &ctx, Some("<img src=\"a.png\">"))
            .unwrap();
        assert_eq!(out, "<img src=\"a.png\">");
    }
}

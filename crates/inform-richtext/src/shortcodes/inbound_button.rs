//! `[inbound_button url="..." target="..."]Label[/inbound_button]`.

use inform_shortcode::{ShortcodeArgs, ShortcodeContext, ShortcodeHandler, ValidationError};

/// Validated `inbound_button` attributes.
///
/// Styling attributes are accepted for compatibility but do not affect the
/// rendered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundButton {
    pub url: String,
    pub target: String,
    pub font_size: Option<i64>,
    pub color: Option<String>,
    pub text_color: Option<String>,
    pub icon: Option<String>,
    pub width: Option<String>,
}

impl TryFrom<&ShortcodeArgs> for InboundButton {
    type Error = ValidationError;

    fn try_from(args: &ShortcodeArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            url: args.require_url("url")?.to_owned(),
            target: args.require("target")?.to_owned(),
            font_size: args.optional_int("font_size")?,
            color: args.optional_string("color"),
            text_color: args.optional_string("text_color"),
            icon: args.optional_string("icon"),
            width: args.optional_string("width"),
        })
    }
}

impl InboundButton {
    /// Render as a link around `content`.
    #[must_use]
    pub fn to_html(&self, content: &str) -> String {
        format!(
            r#"<a href="{}" target="{}">{content}</a>"#,
            self.url, self.target
        )
    }
}

/// Handler for the `inbound_button` block shortcode used at render time.
#[derive(Debug, Default, Clone, Copy)]
pub struct InboundButtonHandler;

impl ShortcodeHandler for InboundButtonHandler {
    fn name(&self) -> &'static str {
        "inbound_button"
    }

    fn end_name(&self) -> Option<&str> {
        Some("/inbound_button")
    }

    fn render(
        &self,
        args: &ShortcodeArgs,
        _ctx: &ShortcodeContext<'_>,
        content: Option<&str>,
    ) -> Result<String, ValidationError> {
        let button = InboundButton::try_from(args)?;
        Ok(button.to_html(content.unwrap_or_default()))
    }
}

/// Handler used when permanently rewriting stored content.
///
/// Only `url` is required and it is not validated; an empty or missing
/// `target` is left off the link.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredInboundButtonHandler;

impl ShortcodeHandler for StoredInboundButtonHandler {
    fn name(&self) -> &'static str {
        "inbound_button"
    }

    fn end_name(&self) -> Option<&str> {
        Some("/inbound_button")
    }

    fn render(
        &self,
        args: &ShortcodeArgs,
        _ctx: &ShortcodeContext<'_>,
        content: Option<&str>,
    ) -> Result<String, ValidationError> {
        let url = args.require("url")?;
        let target = match args.get("target") {
            Some(target) if !target.is_empty() => format!(r#" target="{target}""#),
            _ => String::new(),
        };

        Ok(format!(
            r#"<a href="{url}"{target}>{}</a>"#,
            content.unwrap_or_default()
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(
        handler: &dyn ShortcodeHandler,
        attrs: &str,
        content: &str,
    ) -> Result<String, ValidationError> {
        let args = ShortcodeArgs::parse(attrs).unwrap();
        let ctx = ShortcodeContext::new("inbound_button", "", 0);
        handler.render(&args, &ctx, Some(content))
    }

    #[test]
    fn test_button() {
        let html = render(
            &InboundButtonHandler,
            r#"url="https://example.com" target="_blank""#,
            "Click",
        )
        .unwrap();
        assert_eq!(html, r#"<a href="https://example.com" target="_blank">Click</a>"#);
    }

    #[test]
    fn test_styling_attributes_ignored() {
        let html = render(
            &InboundButtonHandler,
            r##"url="https://example.com" target="_self" font_size="18" color="#fff" icon="arrow" width="100%""##,
            "Go",
        )
        .unwrap();
        assert_eq!(html, r#"<a href="https://example.com" target="_self">Go</a>"#);
    }

    #[test]
    fn test_invalid_font_size() {
        let err = render(
            &InboundButtonHandler,
            r#"url="https://example.com" target="_self" font_size="big""#,
            "Go",
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInt { .. }));
    }

    #[test]
    fn test_requires_target() {
        let err = render(&InboundButtonHandler, r#"url="https://example.com""#, "Go").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "target".to_owned()
            }
        );
    }

    #[test]
    fn test_requires_valid_url() {
        let err = render(&InboundButtonHandler, r#"url="/contact" target="_blank""#, "Go")
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_stored_handler_without_target() {
        let html = render(&StoredInboundButtonHandler, r#"url="/contact""#, "Contact").unwrap();
        assert_eq!(html, r#"<a href="/contact">Contact</a>"#);
    }

    #[test]
    fn test_stored_handler_empty_target() {
        let html = render(&StoredInboundButtonHandler, r#"url="/c" target="""#, "C").unwrap();
        assert_eq!(html, r#"<a href="/c">C</a>"#);
    }

    #[test]
    fn test_stored_handler_with_target() {
        let html = render(&StoredInboundButtonHandler, r#"url="/c" target="_blank""#, "C").unwrap();
        assert_eq!(html, r#"<a href="/c" target="_blank">C</a>"#);
    }

    #[test]
    fn test_stored_handler_requires_url() {
        let err = render(&StoredInboundButtonHandler, r#"target="_blank""#, "C").unwrap_err();
        assert!(matches!(err, ValidationError::Missing { .. }));
    }
}

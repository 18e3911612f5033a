//! `[addlink ...]`: an image linking to an external page.

use std::borrow::Cow;
use std::sync::LazyLock;

use inform_shortcode::{ShortcodeArgs, ShortcodeContext, ShortcodeHandler, ValidationError};
use regex::Regex;

/// Whitespace around `=` for the attributes that the legacy export mangled.
static ATTRIBUTE_SPACING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s(?:post_id|show_images|target|description)+)\s*?=\s*?(['"])"#)
        .expect("invalid attribute spacing regex")
});

/// Close up `name = "value"` to `name="value"` for the affected attributes.
pub(crate) fn fix_attribute_spacing(html: &str) -> Cow<'_, str> {
    ATTRIBUTE_SPACING.replace_all(html, "${1}=${2}")
}

/// Validated `addlink` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddLink {
    pub externalimage: String,
    pub externallink: String,
    pub label: Option<String>,
    pub category: Option<i64>,
    pub post_id: Option<i64>,
    pub show_images: Option<bool>,
    pub target: Option<bool>,
    pub description: Option<String>,
}

impl TryFrom<&ShortcodeArgs> for AddLink {
    type Error = ValidationError;

    fn try_from(args: &ShortcodeArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            externalimage: args.require_url("externalimage")?.to_owned(),
            externallink: args.require("externallink")?.to_owned(),
            label: args.optional_string("label"),
            category: args.optional_int("category")?,
            post_id: args.optional_int("post_id")?,
            show_images: args.optional_bool("show_images")?,
            target: args.optional_bool("target")?,
            description: args.optional_string("description"),
        })
    }
}

impl AddLink {
    /// Render as an image wrapped in a link.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            r#"<a href="{}"><img src="{}"></img></a>"#,
            self.externallink, self.externalimage
        )
    }
}

/// Handler for the atomic `addlink` shortcode.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddLinkHandler;

impl ShortcodeHandler for AddLinkHandler {
    fn name(&self) -> &'static str {
        "addlink"
    }

    fn render(
        &self,
        args: &ShortcodeArgs,
        _ctx: &ShortcodeContext<'_>,
        _content: Option<&str>,
    ) -> Result<String, ValidationError> {
        AddLink::try_from(args).map(|link| link.to_html())
    }
}

//! Link and embed tag rewriting.
//!
//! Stored rich text references internal objects through placeholder tags:
//!
//! ```html
//! <a linktype="page" id="3">Home</a>
//! <embed embedtype="image" id="7" alt="Logo"/>
//! ```
//!
//! [`LinkRewriter`] and [`EmbedRewriter`] replace them with front-end HTML
//! produced by handlers registered per link or embed type.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::entities::{escape_attribute, unescape_attribute};
use crate::rule::RewriteRule;

static A_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<a(\b[^>]*)>").expect("invalid link tag regex"));

static EMBED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<embed(\b[^>]*)/>").expect("invalid embed tag regex"));

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w-]+)="([^"]*)""#).expect("invalid attribute regex"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\w-]+)\}").expect("invalid placeholder regex"));

/// Tag attributes by name. A repeated attribute keeps its last value.
pub type Attributes = BTreeMap<String, String>;

/// Extract `name="value"` pairs from the inside of a tag.
///
/// Values have `&lt;`, `&gt;`, `&quot;` and `&amp;` decoded.
#[must_use]
pub fn extract_attrs(attrs: &str) -> Attributes {
    ATTRIBUTE
        .captures_iter(attrs)
        .map(|caps| (caps[1].to_owned(), unescape_attribute(&caps[2])))
        .collect()
}

/// Produces HTML for a link or embed of one type.
pub trait AttributeHandler: Send + Sync {
    /// Render the tag described by `attrs`.
    fn expand(&self, attrs: &Attributes) -> String;
}

impl<F> AttributeHandler for F
where
    F: Fn(&Attributes) -> String + Send + Sync,
{
    fn expand(&self, attrs: &Attributes) -> String {
        self(attrs)
    }
}

/// Handler filling `{name}` placeholders in a template with attribute values.
///
/// Values are escaped for use inside double-quoted attributes. Placeholders
/// naming a missing attribute become empty.
///
/// # Example
///
/// ```
/// use inform_richtext::{Attributes, AttributeHandler, TemplateHandler};
///
/// let handler = TemplateHandler::new(r#"<a href="/pages/{id}/">"#);
/// let attrs = Attributes::from([("id".to_owned(), "3".to_owned())]);
///
/// assert_eq!(handler.expand(&attrs), r#"<a href="/pages/3/">"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateHandler {
    template: String,
}

impl TemplateHandler {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl AttributeHandler for TemplateHandler {
    fn expand(&self, attrs: &Attributes) -> String {
        PLACEHOLDER
            .replace_all(&self.template, |caps: &Captures<'_>| {
                attrs
                    .get(&caps[1])
                    .map(|value| escape_attribute(value).into_owned())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Link or embed handlers keyed by type name.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Box<dyn AttributeHandler>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: impl AttributeHandler + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        handler: impl AttributeHandler + 'static,
    ) -> Self {
        self.register(name, handler);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn AttributeHandler> {
        self.handlers.get(name).map(|handler| &**handler)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

/// Link types inferred from `href` when a tag has no `linktype`.
const INFERRED_LINK_TYPES: [&str; 3] = ["external", "email", "anchor"];

fn infer_link_type(href: &str) -> Option<&'static str> {
    if href.starts_with("http:") || href.starts_with("https:") {
        Some("external")
    } else if href.starts_with("mailto:") {
        Some("email")
    } else if href.starts_with('#') {
        Some("anchor")
    } else {
        None
    }
}

/// Rewrites `<a ...>` opening tags by link type.
///
/// A tag with an explicit `linktype` is always rewritten; an unregistered
/// type becomes a bare `<a>`. Without `linktype` the type is inferred from
/// `href`, and the tag is left alone unless a handler for the inferred type
/// is registered.
#[derive(Debug, Default)]
pub struct LinkRewriter {
    handlers: HandlerRegistry,
}

impl LinkRewriter {
    #[must_use]
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self { handlers }
    }

    fn replace_tag(&self, caps: &Captures<'_>) -> String {
        let tag = &caps[0];
        let attrs = extract_attrs(&caps[1]);

        let link_type = match attrs.get("linktype") {
            Some(link_type) => link_type.as_str(),
            None => match attrs.get("href").and_then(|href| infer_link_type(href)) {
                Some(link_type) => link_type,
                None => return tag.to_owned(),
            },
        };

        match self.handlers.get(link_type) {
            Some(handler) => handler.expand(&attrs),
            None if INFERRED_LINK_TYPES.contains(&link_type) => tag.to_owned(),
            None => {
                tracing::debug!(link_type, "No handler for link type, stripping attributes");
                "<a>".to_owned()
            }
        }
    }
}

impl RewriteRule for LinkRewriter {
    fn name(&self) -> &'static str {
        "links"
    }

    fn rewrite<'a>(&self, html: &'a str) -> Cow<'a, str> {
        A_TAG.replace_all(html, |caps: &Captures<'_>| self.replace_tag(caps))
    }
}

/// Rewrites self-closing `<embed .../>` tags by embed type.
///
/// An embed with a missing or unregistered `embedtype` is removed.
#[derive(Debug, Default)]
pub struct EmbedRewriter {
    handlers: HandlerRegistry,
}

impl EmbedRewriter {
    #[must_use]
    pub fn new(handlers: HandlerRegistry) -> Self {
        Self { handlers }
    }

    fn replace_tag(&self, caps: &Captures<'_>) -> String {
        let attrs = extract_attrs(&caps[1]);

        let handler = attrs
            .get("embedtype")
            .and_then(|embed_type| self.handlers.get(embed_type));

        match handler {
            Some(handler) => handler.expand(&attrs),
            None => {
                tracing::debug!(
                    embed_type = attrs.get("embedtype").map(String::as_str),
                    "Dropping embed without a registered handler"
                );
                String::new()
            }
        }
    }
}

impl RewriteRule for EmbedRewriter {
    fn name(&self) -> &'static str {
        "embeds"
    }

    fn rewrite<'a>(&self, html: &'a str) -> Cow<'a, str> {
        EMBED_TAG.replace_all(html, |caps: &Captures<'_>| self.replace_tag(caps))
    }
}

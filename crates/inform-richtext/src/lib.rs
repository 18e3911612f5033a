//! Rich-text rewriting for Inform articles.
//!
//! Article content was imported from WordPress and still carries shortcodes
//! and placeholder tags. This crate turns it into front-end HTML and
//! provides filters for rewriting the stored content permanently.
//!
//! # Rendering
//!
//! [`RewritePipeline::frontend`] chains, in order:
//!
//! 1. [`LinkRewriter`]: `<a linktype="...">` tags via registered handlers
//! 2. [`EmbedRewriter`]: `<embed embedtype="..."/>` tags via registered handlers
//! 3. [`ShortcodeRewriter`] for `[addlink]`, `[caption]` and `[inbound_button]`
//! 4. [`NewlineToBr`]
//!
//! Rendering never fails: a shortcode rule that cannot parse a document
//! leaves it as it was.
//!
//! ```
//! use inform_richtext::{HandlerRegistry, RewritePipeline, TemplateHandler};
//!
//! let links = HandlerRegistry::new()
//!     .with("page", TemplateHandler::new(r#"<a href="/pages/{id}/">"#));
//! let pipeline = RewritePipeline::frontend(links, HandlerRegistry::new());
//!
//! let html = pipeline.expand(
//!     r#"<a linktype="page" id="4">About</a> [inbound_button url="https://example.com" target="_blank"]Go[/inbound_button]"#,
//! );
//! assert_eq!(
//!     html,
//!     r#"<a href="/pages/4/">About</a> <a href="https://example.com" target="_blank">Go</a>"#
//! );
//! ```
//!
//! # Content filters
//!
//! A [`ContentFilter`] rewrites a string; a [`ContentLocator`] applies it to
//! selected fields of an [`Article`] and returns the result for the caller
//! to persist.

mod article;
mod entities;
mod filter;
mod locator;
mod pipeline;
mod replace;
mod rule;
pub mod shortcodes;
mod tags;

pub use article::{Article, DEFAULT_RICH_TEXT_BLOCK, StreamBlock};
pub use entities::{escape_attribute, unescape_html};
pub use filter::{
    AmpFilter, ContentFilter, DEFAULT_REPLACEMENT, FilterError, FilterKind, InboundButtonFilter,
    NbspFilter,
};
pub use locator::{ArticleBodyRichTexts, ArticleExcerpt, ArticleTitle, ContentLocator, Locator};
pub use pipeline::RewritePipeline;
pub use replace::Replacements;
pub use rule::{NewlineToBr, RewriteRule};
pub use shortcodes::{ShortcodeKind, ShortcodeRewriter};
pub use tags::{
    AttributeHandler, Attributes, EmbedRewriter, HandlerRegistry, LinkRewriter, TemplateHandler,
    extract_attrs,
};

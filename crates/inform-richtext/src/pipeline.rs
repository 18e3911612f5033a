//! Front-end rewrite pipeline.

use std::borrow::Cow;
use std::fmt;

use crate::rule::{NewlineToBr, RewriteRule};
use crate::shortcodes::{ShortcodeKind, ShortcodeRewriter};
use crate::tags::{EmbedRewriter, HandlerRegistry, LinkRewriter};

/// Ordered chain of [`RewriteRule`]s applied to one document.
///
/// Each rule sees the full output of the previous one. Build the pipeline
/// once and share it; [`expand`](Self::expand) takes `&self`.
///
/// # Example
///
/// ```
/// use inform_richtext::{HandlerRegistry, RewritePipeline};
///
/// let pipeline = RewritePipeline::frontend(HandlerRegistry::new(), HandlerRegistry::new());
///
/// assert_eq!(pipeline.expand("line1\nline2"), "line1<br />line2");
/// ```
#[derive(Default)]
pub struct RewritePipeline {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl RewritePipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule<R: RewriteRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// The pipeline used to render stored rich text on the front end.
    ///
    /// Rules run in this order: links, embeds, `addlink`, `caption`,
    /// `inbound_button`, newline to `<br />`.
    #[must_use]
    pub fn frontend(links: HandlerRegistry, embeds: HandlerRegistry) -> Self {
        let pipeline = Self::new()
            .with_rule(LinkRewriter::new(links))
            .with_rule(EmbedRewriter::new(embeds));

        ShortcodeKind::ALL
            .into_iter()
            .fold(pipeline, |pipeline, kind| {
                pipeline.with_rule(ShortcodeRewriter::new(kind))
            })
            .with_rule(NewlineToBr)
    }

    /// Rule names in application order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    /// Run `html` through every rule.
    #[must_use]
    pub fn expand(&self, html: &str) -> String {
        let mut current = Cow::Borrowed(html);

        for rule in &self.rules {
            let rewritten = match rule.rewrite(&current) {
                Cow::Owned(rewritten) => rewritten,
                Cow::Borrowed(_) => continue,
            };
            current = Cow::Owned(rewritten);
        }

        current.into_owned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RewritePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

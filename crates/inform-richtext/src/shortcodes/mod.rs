//! Shortcode kinds found in imported article content.
//!
//! Each [`ShortcodeKind`] maps to one handler and one validation failure
//! policy. [`ShortcodeRewriter`] turns a kind into a [`RewriteRule`].

mod add_link;
mod caption;
mod inbound_button;

use std::borrow::Cow;
use std::fmt;

use inform_shortcode::{FailurePolicy, ShortcodeParser};

pub use add_link::{AddLink, AddLinkHandler};
pub(crate) use add_link::fix_attribute_spacing;
pub use caption::{CaptionHandler, render_figure};
pub use inbound_button::{InboundButton, InboundButtonHandler, StoredInboundButtonHandler};

use crate::entities::unescape_html;
use crate::rule::RewriteRule;

/// Shortcode kinds understood by the front-end pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcodeKind {
    AddLink,
    Caption,
    InboundButton,
}

impl ShortcodeKind {
    /// All kinds, in pipeline order.
    pub const ALL: [Self; 3] = [Self::AddLink, Self::Caption, Self::InboundButton];

    /// Opening tag name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AddLink => "addlink",
            Self::Caption => "caption",
            Self::InboundButton => "inbound_button",
        }
    }

    /// What happens when the shortcode's attributes fail validation.
    ///
    /// Add-Link drops the directive; the others abort the whole document.
    #[must_use]
    pub fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::AddLink => FailurePolicy::Drop,
            Self::Caption | Self::InboundButton => FailurePolicy::Propagate,
        }
    }

    /// Parser with only this kind registered.
    #[must_use]
    pub fn parser(self) -> ShortcodeParser {
        let parser = ShortcodeParser::new();
        let policy = self.failure_policy();

        match self {
            Self::AddLink => parser.with_handler(AddLinkHandler, policy),
            Self::Caption => parser.with_handler(CaptionHandler, policy),
            Self::InboundButton => parser.with_handler(InboundButtonHandler, policy),
        }
    }
}

impl fmt::Display for ShortcodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rewrite rule expanding a single shortcode kind.
///
/// The document is HTML-unescaped before parsing. When nothing is expanded,
/// or the parse fails for any reason, the input is returned untouched.
pub struct ShortcodeRewriter {
    kind: ShortcodeKind,
    parser: ShortcodeParser,
}

impl ShortcodeRewriter {
    /// Build the rewriter for `kind`.
    #[must_use]
    pub fn new(kind: ShortcodeKind) -> Self {
        Self {
            kind,
            parser: kind.parser(),
        }
    }

    /// Shortcode kind handled by this rewriter.
    #[must_use]
    pub fn kind(&self) -> ShortcodeKind {
        self.kind
    }

    fn prepare<'a>(&self, html: &'a str) -> Cow<'a, str> {
        let unescaped = unescape_html(html);

        if self.kind == ShortcodeKind::AddLink
            && let Cow::Owned(fixed) = fix_attribute_spacing(&unescaped)
        {
            return Cow::Owned(fixed);
        }
        unescaped
    }
}

impl fmt::Debug for ShortcodeRewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcodeRewriter")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl RewriteRule for ShortcodeRewriter {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn rewrite<'a>(&self, html: &'a str) -> Cow<'a, str> {
        if !html.contains(self.kind.name()) {
            return Cow::Borrowed(html);
        }

        let source = self.prepare(html);
        match self.parser.parse(&source) {
            Ok(expansion) if !expansion.is_noop() => Cow::Owned(expansion.output),
            Ok(_) => Cow::Borrowed(html),
            Err(e) => {
                tracing::debug!(
                    shortcode = %self.kind,
                    error = %e,
                    "Shortcode rewrite failed, keeping original content"
                );
                Cow::Borrowed(html)
            }
        }
    }
}

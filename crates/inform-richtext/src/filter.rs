//! Content filters for permanent rewrites of stored content.
//!
//! Unlike [`RewritePipeline`](crate::RewritePipeline), filters report
//! failures instead of falling back to the original text, so an operator
//! running a bulk rewrite sees what could not be converted.

use std::fmt;
use std::str::FromStr;

use inform_shortcode::{FailurePolicy, ShortcodeError, ShortcodeParser};

use crate::replace::Replacements;
use crate::shortcodes::StoredInboundButtonHandler;

/// Replacement used when a filter is built without one.
pub const DEFAULT_REPLACEMENT: &str = " ";

/// Error raised by a content filter.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error(transparent)]
    Shortcode(#[from] ShortcodeError),
    #[error("unknown filter '{0}' (expected one of: nbsp, amp, inbound-button)")]
    UnknownFilter(String),
    #[error("unknown locator '{0}' (expected one of: body, excerpt, title)")]
    UnknownLocator(String),
}

/// String transform applied to one stored content field.
pub trait ContentFilter: Send + Sync {
    /// Filter name for diagnostics.
    fn name(&self) -> &str;

    /// Transform `content`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] when the content cannot be transformed.
    fn apply(&self, content: &str) -> Result<String, FilterError>;
}

/// Replaces `&nbsp;` entities and raw U+00A0 characters.
#[derive(Debug, Clone)]
pub struct NbspFilter {
    replacements: Replacements,
}

impl NbspFilter {
    #[must_use]
    pub fn new(replace_with: &str) -> Self {
        Self {
            replacements: Replacements::with_capacity(2)
                .with("&nbsp;", replace_with)
                .with("\u{a0}", replace_with),
        }
    }
}

impl Default for NbspFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REPLACEMENT)
    }
}

impl ContentFilter for NbspFilter {
    fn name(&self) -> &'static str {
        "nbsp"
    }

    fn apply(&self, content: &str) -> Result<String, FilterError> {
        Ok(self.replacements.apply(content).into_owned())
    }
}

/// Replaces `&amp;` entities.
#[derive(Debug, Clone)]
pub struct AmpFilter {
    replacements: Replacements,
}

impl AmpFilter {
    #[must_use]
    pub fn new(replace_with: &str) -> Self {
        Self {
            replacements: Replacements::new().with("&amp;", replace_with),
        }
    }
}

impl Default for AmpFilter {
    fn default() -> Self {
        Self::new(DEFAULT_REPLACEMENT)
    }
}

impl ContentFilter for AmpFilter {
    fn name(&self) -> &'static str {
        "amp"
    }

    fn apply(&self, content: &str) -> Result<String, FilterError> {
        Ok(self.replacements.apply(content).into_owned())
    }
}

/// Permanently expands `[inbound_button]` blocks into links.
///
/// Only `url` is required; malformed markup is an error.
pub struct InboundButtonFilter {
    parser: ShortcodeParser,
}

impl InboundButtonFilter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: ShortcodeParser::new()
                .with_handler(StoredInboundButtonHandler, FailurePolicy::Propagate),
        }
    }
}

impl Default for InboundButtonFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InboundButtonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboundButtonFilter").finish_non_exhaustive()
    }
}

impl ContentFilter for InboundButtonFilter {
    fn name(&self) -> &'static str {
        "inbound-button"
    }

    fn apply(&self, content: &str) -> Result<String, FilterError> {
        Ok(self.parser.parse(content)?.output)
    }
}

/// Built-in filters selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Nbsp,
    Amp,
    InboundButton,
}

impl FilterKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nbsp => "nbsp",
            Self::Amp => "amp",
            Self::InboundButton => "inbound-button",
        }
    }

    /// Build the filter. `replace_with` is ignored by filters that do not
    /// replace text.
    #[must_use]
    pub fn build(self, replace_with: &str) -> Box<dyn ContentFilter> {
        match self {
            Self::Nbsp => Box::new(NbspFilter::new(replace_with)),
            Self::Amp => Box::new(AmpFilter::new(replace_with)),
            Self::InboundButton => Box::new(InboundButtonFilter::new()),
        }
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nbsp" => Ok(Self::Nbsp),
            "amp" => Ok(Self::Amp),
            "inbound-button" | "inbound_button" => Ok(Self::InboundButton),
            other => Err(FilterError::UnknownFilter(other.to_owned())),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

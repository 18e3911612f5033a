//! Shortcode handler trait.

use crate::error::ValidationError;
use crate::{ShortcodeArgs, ShortcodeContext};

/// Handler for one shortcode kind.
///
/// Atomic shortcodes (`[name ...]`) return `None` from [`end_name`](Self::end_name).
/// Block shortcodes (`[name ...]content[/name]`) name their closing tag and
/// receive the captured content.
///
/// # Thread Safety
///
/// Handlers are `Send + Sync` and take `&self`: one parser is built at
/// startup and shared by every render call.
///
/// # Example
///
/// ```
/// use inform_shortcode::{
///     FailurePolicy, ShortcodeArgs, ShortcodeContext, ShortcodeHandler, ShortcodeParser,
///     ValidationError,
/// };
///
/// struct Kbd;
///
/// impl ShortcodeHandler for Kbd {
///     fn name(&self) -> &str { "kbd" }
///     fn end_name(&self) -> Option<&str> { Some("/kbd") }
///
///     fn render(
///         &self,
///         _args: &ShortcodeArgs,
///         _ctx: &ShortcodeContext<'_>,
///         content: Option<&str>,
///     ) -> Result<String, ValidationError> {
///         Ok(format!("<kbd>{}</kbd>", content.unwrap_or_default()))
///     }
/// }
///
/// let parser = ShortcodeParser::new().with_handler(Kbd, FailurePolicy::Propagate);
/// let expansion = parser.parse("Press [kbd]Ctrl+C[/kbd].").unwrap();
/// assert_eq!(expansion.output, "Press <kbd>Ctrl+C</kbd>.");
/// ```
pub trait ShortcodeHandler: Send + Sync {
    /// Opening tag name (e.g., "addlink", "caption").
    fn name(&self) -> &str;

    /// Closing tag name (e.g., "/caption") for block shortcodes.
    fn end_name(&self) -> Option<&str> {
        None
    }

    /// Produce the replacement for one occurrence.
    ///
    /// `content` is `Some` for block shortcodes and `None` for atomic ones.
    fn render(
        &self,
        args: &ShortcodeArgs,
        ctx: &ShortcodeContext<'_>,
        content: Option<&str>,
    ) -> Result<String, ValidationError>;
}

/// What the parser does when a handler rejects its attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Replace the directive with an empty string and keep going.
    Drop,
    /// Abort the parse with [`ShortcodeError::Validation`](crate::ShortcodeError::Validation).
    Propagate,
}

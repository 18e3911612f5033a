//! Shortcode parser.
//!
//! Expands registered shortcodes in a single pass over the token stream.

use crate::error::{ShortcodeError, SyntaxError, ValidationError};
use crate::lexer::{Token, split_name, tokenize};
use crate::{FailurePolicy, ShortcodeArgs, ShortcodeContext, ShortcodeHandler};

/// Configuration for the shortcode parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Opening tag delimiter.
    ///
    /// Default: `[`
    pub start: String,
    /// Closing tag delimiter.
    ///
    /// Default: `]`
    pub end: String,
    /// Escape sequence that makes a following tag literal.
    ///
    /// Default: `\`
    pub escape: Option<String>,
    /// Pass unregistered tags through verbatim instead of failing.
    ///
    /// Default: `true`
    pub ignore_unknown: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: "[".to_owned(),
            end: "]".to_owned(),
            escape: Some("\\".to_owned()),
            ignore_unknown: true,
        }
    }

    /// Set the tag delimiters.
    ///
    /// An empty delimiter disables tag recognition: every input parses to
    /// itself.
    #[must_use]
    pub fn with_delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = start.into();
        self.end = end.into();
        self
    }

    /// Set the escape sequence (`None` disables escaping).
    #[must_use]
    pub fn with_escape(mut self, escape: Option<String>) -> Self {
        self.escape = escape;
        self
    }

    /// Set whether unknown tags are passed through.
    #[must_use]
    pub fn with_ignore_unknown(mut self, ignore_unknown: bool) -> Self {
        self.ignore_unknown = ignore_unknown;
        self
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Input with every registered shortcode replaced.
    pub output: String,
    /// Number of shortcodes replaced (dropped ones included).
    pub expanded: usize,
}

impl Expansion {
    /// True when no registered shortcode occurred in the input.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.expanded == 0
    }
}

struct Registration {
    handler: Box<dyn ShortcodeHandler>,
    policy: FailurePolicy,
}

/// Block shortcode whose closing tag has not been seen yet.
struct OpenBlock<'a> {
    index: usize,
    name: &'a str,
    args: ShortcodeArgs,
    offset: usize,
    content: String,
}

/// Parser for bracketed shortcodes.
///
/// Holds the registered handlers; build it once and call
/// [`parse`](Self::parse) for every document.
///
/// # Example
///
/// ```
/// use inform_shortcode::{
///     FailurePolicy, ShortcodeArgs, ShortcodeContext, ShortcodeHandler, ShortcodeParser,
///     ValidationError,
/// };
///
/// struct Year;
///
/// impl ShortcodeHandler for Year {
///     fn name(&self) -> &str { "year" }
///
///     fn render(
///         &self,
///         _args: &ShortcodeArgs,
///         _ctx: &ShortcodeContext<'_>,
///         _content: Option<&str>,
///     ) -> Result<String, ValidationError> {
///         Ok("2022".to_owned())
///     }
/// }
///
/// let parser = ShortcodeParser::new().with_handler(Year, FailurePolicy::Drop);
/// let expansion = parser.parse("(c) [year] [unknown]").unwrap();
/// assert_eq!(expansion.output, "(c) 2022 [unknown]");
/// assert_eq!(expansion.expanded, 1);
/// ```
pub struct ShortcodeParser {
    config: ParserConfig,
    handlers: Vec<Registration>,
}

impl Default for ShortcodeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcodeParser {
    /// Create a parser with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            handlers: Vec::new(),
        }
    }

    /// Register a handler together with its validation failure policy.
    #[must_use]
    pub fn with_handler<H: ShortcodeHandler + 'static>(
        mut self,
        handler: H,
        policy: FailurePolicy,
    ) -> Self {
        self.handlers.push(Registration {
            handler: Box::new(handler),
            policy,
        });
        self
    }

    /// Parser configuration.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Expand every registered shortcode in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortcodeError::Syntax`] for malformed markup and
    /// [`ShortcodeError::Validation`] when a handler registered with
    /// [`FailurePolicy::Propagate`] rejects its attributes.
    pub fn parse(&self, input: &str) -> Result<Expansion, ShortcodeError> {
        let tokens = tokenize(
            input,
            &self.config.start,
            &self.config.end,
            self.config.escape.as_deref(),
        )?;

        let mut output = String::with_capacity(input.len());
        let mut expanded = 0;
        let mut open: Option<OpenBlock<'_>> = None;

        for token in tokens {
            let (raw, inner, offset) = match token {
                Token::Text(text) => {
                    match open.as_mut() {
                        Some(block) => block.content.push_str(text),
                        None => output.push_str(text),
                    }
                    continue;
                }
                Token::Tag { raw, inner, offset } => (raw, inner, offset),
            };
            let (name, attrs) = split_name(inner);

            // Inside a block only its own closing tag is significant
            if let Some(index) = open.as_ref().map(|block| block.index) {
                let handler = &self.handlers[index].handler;
                if handler.end_name() == Some(name) {
                    if let Some(block) = open.take() {
                        output.push_str(&self.close_block(block, input)?);
                        expanded += 1;
                    }
                } else if handler.name() == name {
                    return Err(SyntaxError::NestedBlock {
                        tag: name.to_owned(),
                        offset,
                    }
                    .into());
                } else if let Some(block) = open.as_mut() {
                    block.content.push_str(raw);
                }
                continue;
            }

            if name.is_empty() {
                output.push_str(raw);
                continue;
            }

            if let Some(index) = self.find_opening(name) {
                let args = ShortcodeArgs::parse(attrs).ok_or_else(|| SyntaxError::UnclosedQuote {
                    tag: name.to_owned(),
                    offset,
                })?;

                if self.handlers[index].handler.end_name().is_some() {
                    open = Some(OpenBlock {
                        index,
                        name,
                        args,
                        offset,
                        content: String::new(),
                    });
                } else {
                    let ctx = ShortcodeContext::new(name, input, offset);
                    output.push_str(&self.render(index, &args, &ctx, None)?);
                    expanded += 1;
                }
            } else if self.is_closing(name) {
                return Err(SyntaxError::UnexpectedEndTag {
                    tag: name.to_owned(),
                    offset,
                }
                .into());
            } else if self.config.ignore_unknown {
                output.push_str(raw);
            } else {
                return Err(SyntaxError::UnknownTag {
                    tag: name.to_owned(),
                    offset,
                }
                .into());
            }
        }

        if let Some(block) = open {
            return Err(SyntaxError::UnclosedBlock {
                tag: block.name.to_owned(),
                offset: block.offset,
            }
            .into());
        }

        Ok(Expansion { output, expanded })
    }

    fn find_opening(&self, name: &str) -> Option<usize> {
        self.handlers.iter().position(|r| r.handler.name() == name)
    }

    fn is_closing(&self, name: &str) -> bool {
        self.handlers
            .iter()
            .any(|r| r.handler.end_name() == Some(name))
    }

    fn close_block(&self, block: OpenBlock<'_>, input: &str) -> Result<String, ShortcodeError> {
        let ctx = ShortcodeContext::new(block.name, input, block.offset);
        self.render(block.index, &block.args, &ctx, Some(&block.content))
    }

    fn render(
        &self,
        index: usize,
        args: &ShortcodeArgs,
        ctx: &ShortcodeContext<'_>,
        content: Option<&str>,
    ) -> Result<String, ShortcodeError> {
        let registration = &self.handlers[index];

        match registration.handler.render(args, ctx, content) {
            Ok(html) => Ok(html),
            Err(err) => on_invalid(registration.policy, ctx, err),
        }
    }
}

/// Apply a registration's failure policy to a rejected shortcode.
fn on_invalid(
    policy: FailurePolicy,
    ctx: &ShortcodeContext<'_>,
    err: ValidationError,
) -> Result<String, ShortcodeError> {
    match policy {
        FailurePolicy::Drop => {
            tracing::debug!(
                tag = ctx.name,
                line = ctx.line,
                error = %err,
                "Dropping shortcode with invalid attributes"
            );
            Ok(String::new())
        }
        FailurePolicy::Propagate => Err(ShortcodeError::Validation {
            tag: ctx.name.to_owned(),
            offset: ctx.offset,
            source: err,
        }),
    }
}

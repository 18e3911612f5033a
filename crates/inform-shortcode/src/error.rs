//! Shortcode error types.

/// Structural error in the shortcode markup.
///
/// Offsets are byte offsets of the offending tag in the parsed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// Start delimiter with no end delimiter after it.
    #[error("unterminated shortcode tag at offset {offset}")]
    UnterminatedTag { offset: usize },
    /// Attribute list has an unterminated quote.
    #[error("unclosed quotation in `{tag}` tag at offset {offset}")]
    UnclosedQuote { tag: String, offset: usize },
    /// Closing tag without an open block.
    #[error("unexpected closing tag `{tag}` at offset {offset}")]
    UnexpectedEndTag { tag: String, offset: usize },
    /// Block opened but never closed.
    #[error("unclosed `{tag}` block opened at offset {offset}")]
    UnclosedBlock { tag: String, offset: usize },
    /// Block opened again before its closing tag.
    #[error("nested `{tag}` block at offset {offset}")]
    NestedBlock { tag: String, offset: usize },
    /// Tag not registered while unknown tags are rejected.
    #[error("unrecognised shortcode tag `{tag}` at offset {offset}")]
    UnknownTag { tag: String, offset: usize },
}

/// Attribute value rejected by a handler's schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute absent.
    #[error("{field}: field required")]
    Missing { field: String },
    /// Not an absolute `http(s)` URL.
    #[error("{field}: invalid URL {value:?} ({reason})")]
    InvalidUrl {
        field: String,
        value: String,
        reason: String,
    },
    /// Not an integer.
    #[error("{field}: value is not a valid integer ({value:?})")]
    InvalidInt { field: String, value: String },
    /// Not a boolean.
    #[error("{field}: value could not be parsed to a boolean ({value:?})")]
    InvalidBool { field: String, value: String },
}

/// Error returned by [`ShortcodeParser::parse`](crate::ShortcodeParser::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcodeError {
    /// Malformed markup.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A handler registered with [`FailurePolicy::Propagate`](crate::FailurePolicy::Propagate)
    /// rejected its attributes.
    #[error("invalid `{tag}` shortcode at offset {offset}: {source}")]
    Validation {
        tag: String,
        offset: usize,
        #[source]
        source: ValidationError,
    },
}

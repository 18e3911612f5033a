//! Shortcode tokenizer.
//!
//! Splits input into text runs and delimited tags. A tag may span line
//! breaks; it ends at the first end delimiter after its start.

use crate::error::SyntaxError;

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text, copied to the output as-is.
    Text(&'a str),
    /// A delimited tag.
    Tag {
        /// Full source text including delimiters.
        raw: &'a str,
        /// Text between the delimiters.
        inner: &'a str,
        /// Byte offset of the start delimiter.
        offset: usize,
    },
}

/// Tokenize `input` with the given delimiters.
///
/// An `escape` sequence directly before a start delimiter makes it literal.
/// When the escaped tag is complete the escape is removed. Empty delimiters
/// never match, so the whole input is text.
///
/// # Errors
///
/// Returns [`SyntaxError::UnterminatedTag`] for an unescaped start delimiter
/// with no end delimiter after it.
pub(crate) fn tokenize<'a>(
    input: &'a str,
    start: &str,
    end: &str,
    escape: Option<&str>,
) -> Result<Vec<Token<'a>>, SyntaxError> {
    let mut tokens = Vec::new();
    if start.is_empty() || end.is_empty() {
        push_text(&mut tokens, input);
        return Ok(tokens);
    }

    let mut text_start = 0;
    let mut search = 0;

    while let Some(rel) = input[search..].find(start) {
        let tag_start = search + rel;
        let inner_start = tag_start + start.len();
        let escaped = escape.filter(|esc| {
            !esc.is_empty()
                && tag_start >= text_start + esc.len()
                && input[..tag_start].ends_with(*esc)
        });

        let Some(end_rel) = input[inner_start..].find(end) else {
            if escaped.is_some() {
                break;
            }
            return Err(SyntaxError::UnterminatedTag { offset: tag_start });
        };
        let inner_end = inner_start + end_rel;
        let tag_end = inner_end + end.len();

        if let Some(esc) = escaped {
            push_text(&mut tokens, &input[text_start..tag_start - esc.len()]);
            push_text(&mut tokens, &input[tag_start..tag_end]);
        } else {
            push_text(&mut tokens, &input[text_start..tag_start]);
            tokens.push(Token::Tag {
                raw: &input[tag_start..tag_end],
                inner: &input[inner_start..inner_end],
                offset: tag_start,
            });
        }

        text_start = tag_end;
        search = tag_end;
    }

    push_text(&mut tokens, &input[text_start..]);
    Ok(tokens)
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}

/// Split tag text into its name and the remaining attribute text.
pub(crate) fn split_name(inner: &str) -> (&str, &str) {
    let trimmed = inner.trim();
    match trimmed.find(char::is_whitespace) {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    }
}

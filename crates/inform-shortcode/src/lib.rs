//! Bracketed shortcode parser with pluggable handlers.
//!
//! Legacy rich text imported from WordPress embeds shortcodes such as
//! `[addlink externalimage="..."]` or `[caption]<img ...> Text[/caption]`.
//! This crate finds them and replaces each occurrence with the output of a
//! registered [`ShortcodeHandler`].
//!
//! # Syntax
//!
//! - **Atomic**: `[name arg key="value"]`
//! - **Block**: `[name ...]content[/name]` (content captured verbatim)
//! - **Escaped**: `\[name]` is emitted as the literal text `[name]`
//!
//! A tag may span line breaks. Unknown tags are passed through unchanged
//! unless [`ParserConfig::ignore_unknown`] is turned off.
//!
//! # Errors
//!
//! Malformed markup (unterminated tag or quote, unmatched closing tag,
//! unclosed or nested block) yields [`ShortcodeError::Syntax`]. What happens when
//! a handler rejects its attributes is decided per registration by
//! [`FailurePolicy`].

mod args;
mod context;
mod error;
mod handler;
mod lexer;
mod processor;
pub mod validate;

pub use args::ShortcodeArgs;
pub use context::ShortcodeContext;
pub use error::{ShortcodeError, SyntaxError, ValidationError};
pub use handler::{FailurePolicy, ShortcodeHandler};
pub use processor::{Expansion, ParserConfig, ShortcodeParser};

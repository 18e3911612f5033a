//! Shortcode argument parsing.
//!
//! Splits the attribute text of a tag (`[name a b key="value"]`) into
//! positional and keyword arguments using shell-style quoting.

use std::collections::HashMap;

/// Parsed arguments from a shortcode tag.
///
/// # Example
///
/// ```
/// use inform_shortcode::ShortcodeArgs;
///
/// let args = ShortcodeArgs::parse(r#"primary url="https://example.com" target='_blank'"#).unwrap();
/// assert_eq!(args.positional, vec!["primary"]);
/// assert_eq!(args.get("url"), Some("https://example.com"));
/// assert_eq!(args.get("target"), Some("_blank"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShortcodeArgs {
    /// Bare tokens, in source order.
    pub positional: Vec<String>,
    /// `key=value` tokens, split at the first `=`.
    pub keyword: HashMap<String, String>,
}

impl ShortcodeArgs {
    /// Parse the attribute text that follows the tag name.
    ///
    /// Tokens are separated by whitespace. Single and double quotes group
    /// characters and are removed. Outside single quotes a backslash escapes
    /// the next character (inside double quotes only `"` and `\`).
    ///
    /// Returns `None` if a quote is left open.
    #[must_use]
    pub fn parse(attrs: &str) -> Option<Self> {
        let mut args = Self::default();

        for token in split_tokens(attrs)? {
            if let Some((key, value)) = token.split_once('=') {
                args.keyword.insert(key.to_owned(), value.to_owned());
            } else {
                args.positional.push(token);
            }
        }

        Some(args)
    }

    /// Get a keyword argument by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keyword.get(key).map(String::as_str)
    }

    /// Check whether no arguments were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split attribute text into shell-style tokens.
fn split_tokens(s: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // A token exists once any character (or an empty quoted string) was seen
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' if matches!(chars.peek(), Some('"' | '\\')) => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                _ => current.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '\\' => {
                    in_token = true;
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    in_token = true;
                    current.push(c);
                }
            },
        }
    }

    if quote != Quote::None {
        return None;
    }
    if in_token {
        tokens.push(current);
    }

    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args() {
        let args = ShortcodeArgs::parse("").unwrap();
        assert!(args.is_empty());
    }

    #[test]
    fn test_positional() {
        let args = ShortcodeArgs::parse("one two  three").unwrap();
        assert_eq!(args.positional, vec!["one", "two", "three"]);
        assert!(args.keyword.is_empty());
    }

    #[test]
    fn test_double_quoted_value() {
        let args = ShortcodeArgs::parse(r#"label="Read more""#).unwrap();
        assert_eq!(args.get("label"), Some("Read more"));
    }

    #[test]
    fn test_single_quoted_value() {
        let args = ShortcodeArgs::parse("title='Hello World'").unwrap();
        assert_eq!(args.get("title"), Some("Hello World"));
    }

    #[test]
    fn test_unquoted_value() {
        let args = ShortcodeArgs::parse("width=560 align=left").unwrap();
        assert_eq!(args.get("width"), Some("560"));
        assert_eq!(args.get("align"), Some("left"));
    }

    #[test]
    fn test_empty_quoted_value() {
        let args = ShortcodeArgs::parse(r#"alt="""#).unwrap();
        assert_eq!(args.get("alt"), Some(""));
    }

    #[test]
    fn test_value_split_at_first_equals() {
        let args = ShortcodeArgs::parse(r#"url="https://x.com/?a=1&b=2""#).unwrap();
        assert_eq!(args.get("url"), Some("https://x.com/?a=1&b=2"));
    }

    #[test]
    fn test_spaced_equals_splits_apart() {
        // `key = "value"` is three tokens; callers fix this up before parsing
        let args = ShortcodeArgs::parse(r#"post_id = "12""#).unwrap();
        assert_eq!(args.positional, vec!["post_id", "12"]);
        assert_eq!(args.keyword.len(), 1);
        assert_eq!(args.get(""), Some(""));
    }

    #[test]
    fn test_escaped_quote_in_double_quotes() {
        let args = ShortcodeArgs::parse(r#"text="say \"hi\"""#).unwrap();
        assert_eq!(args.get("text"), Some(r#"say "hi""#));
    }

    #[test]
    fn test_backslash_kept_in_double_quotes() {
        let args = ShortcodeArgs::parse(r#"path="a\b""#).unwrap();
        assert_eq!(args.get("path"), Some(r"a\b"));
    }

    #[test]
    fn test_backslash_outside_quotes() {
        let args = ShortcodeArgs::parse(r"a\ b").unwrap();
        assert_eq!(args.positional, vec!["a b"]);
    }

    #[test]
    fn test_adjacent_quotes_join() {
        let args = ShortcodeArgs::parse(r#"a"b c"d"#).unwrap();
        assert_eq!(args.positional, vec!["ab cd"]);
    }

    #[test]
    fn test_unclosed_quote() {
        assert_eq!(ShortcodeArgs::parse(r#"label="oops"#), None);
        assert_eq!(ShortcodeArgs::parse("label='oops"), None);
    }

    #[test]
    fn test_get_nonexistent() {
        let args = ShortcodeArgs::parse("foo=bar").unwrap();
        assert_eq!(args.get("baz"), None);
    }
}

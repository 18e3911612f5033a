//! Literal find/replace transforms.

use std::borrow::Cow;

/// Ordered list of literal string replacements.
///
/// Replacements are applied sequentially, so a later pair sees the output of
/// the earlier ones.
///
/// # Example
///
/// ```
/// use inform_richtext::Replacements;
///
/// let replacements = Replacements::new()
///     .with("&nbsp;", " ")
///     .with("\u{a0}", " ");
///
/// assert_eq!(replacements.apply("a&nbsp;b\u{a0}c"), "a b c");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Create a new empty replacement list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new replacement list with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement: all occurrences of `from` will be replaced with `to`.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.items.push((from.into(), to.into()));
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.add(from, to);
        self
    }

    /// Apply all registered replacements.
    ///
    /// Borrows the input when none of the patterns occur.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(text);

        for (from, to) in &self.items {
            if !from.is_empty() && result.contains(from.as_str()) {
                result = Cow::Owned(result.replace(from.as_str(), to));
            }
        }

        result
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of registered replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

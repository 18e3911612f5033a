//! Where in an article a content filter applies.

use std::str::FromStr;

use crate::article::{Article, DEFAULT_RICH_TEXT_BLOCK};
use crate::filter::{ContentFilter, FilterError};

/// Selects the fields of an article a [`ContentFilter`] rewrites.
///
/// Locators hand the mutated article back; persisting it is up to the caller.
pub trait ContentLocator {
    /// Apply `filter` to the located fields of `article`.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by `filter`.
    fn filter_content(
        &self,
        article: Article,
        filter: &dyn ContentFilter,
    ) -> Result<Article, FilterError>;

    /// Lazily apply `filter` to every article of `articles`.
    fn filter_all<'a, I>(
        &'a self,
        articles: I,
        filter: &'a dyn ContentFilter,
    ) -> impl Iterator<Item = Result<Article, FilterError>> + 'a
    where
        Self: Sized,
        I: IntoIterator<Item = Article>,
        I::IntoIter: 'a,
    {
        articles
            .into_iter()
            .map(move |article| self.filter_content(article, filter))
    }
}

/// Every rich-text block of the article body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleBodyRichTexts {
    block_types: Vec<String>,
}

impl ArticleBodyRichTexts {
    #[must_use]
    pub fn new(block_types: Vec<String>) -> Self {
        Self { block_types }
    }

    #[must_use]
    pub fn block_types(&self) -> &[String] {
        &self.block_types
    }
}

impl Default for ArticleBodyRichTexts {
    fn default() -> Self {
        Self::new(vec![DEFAULT_RICH_TEXT_BLOCK.to_owned()])
    }
}

impl ContentLocator for ArticleBodyRichTexts {
    fn filter_content(
        &self,
        mut article: Article,
        filter: &dyn ContentFilter,
    ) -> Result<Article, FilterError> {
        for source in article.rich_text_sources_mut(&self.block_types) {
            *source = filter.apply(source)?;
        }
        Ok(article)
    }
}

/// The article excerpt.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArticleExcerpt;

impl ContentLocator for ArticleExcerpt {
    fn filter_content(
        &self,
        mut article: Article,
        filter: &dyn ContentFilter,
    ) -> Result<Article, FilterError> {
        article.excerpt = filter.apply(&article.excerpt)?;
        Ok(article)
    }
}

/// The article title.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArticleTitle;

impl ContentLocator for ArticleTitle {
    fn filter_content(
        &self,
        mut article: Article,
        filter: &dyn ContentFilter,
    ) -> Result<Article, FilterError> {
        article.title = filter.apply(&article.title)?;
        Ok(article)
    }
}

/// Built-in locators selectable by name (`body`, `excerpt`, `title`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Body(ArticleBodyRichTexts),
    Excerpt,
    Title,
}

impl Locator {
    /// Use `block_types` as the rich-text block types of a body locator.
    #[must_use]
    pub fn with_block_types(self, block_types: Vec<String>) -> Self {
        match self {
            Self::Body(_) => Self::Body(ArticleBodyRichTexts::new(block_types)),
            other => other,
        }
    }
}

impl FromStr for Locator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "body" => Ok(Self::Body(ArticleBodyRichTexts::default())),
            "excerpt" => Ok(Self::Excerpt),
            "title" => Ok(Self::Title),
            other => Err(FilterError::UnknownLocator(other.to_owned())),
        }
    }
}

impl ContentLocator for Locator {
    fn filter_content(
        &self,
        article: Article,
        filter: &dyn ContentFilter,
    ) -> Result<Article, FilterError> {
        match self {
            Self::Body(body) => body.filter_content(article, filter),
            Self::Excerpt => ArticleExcerpt.filter_content(article, filter),
            Self::Title => ArticleTitle.filter_content(article, filter),
        }
    }
}

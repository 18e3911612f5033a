//! Article content as exported by the CMS.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block type holding rich text in article bodies.
pub const DEFAULT_RICH_TEXT_BLOCK: &str = "paragraph";

/// One block of an article's stream-field body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl StreamBlock {
    /// Rich-text block with the given HTML source.
    #[must_use]
    pub fn rich_text(source: impl Into<String>) -> Self {
        Self {
            block_type: DEFAULT_RICH_TEXT_BLOCK.to_owned(),
            value: Value::String(source.into()),
            id: None,
        }
    }

    /// HTML source of this block if it is one of `block_types` and holds text.
    pub fn rich_text_source_mut(&mut self, block_types: &[String]) -> Option<&mut String> {
        if !block_types.contains(&self.block_type) {
            return None;
        }
        match &mut self.value {
            Value::String(source) => Some(source),
            _ => None,
        }
    }
}

/// Article fields touched by content filters.
///
/// Fields not modelled here are kept in [`extra`](Self::extra) so an export
/// survives a read/write cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: Vec<StreamBlock>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: StreamBlock) -> Self {
        self.body.push(block);
        self
    }

    /// Mutable HTML sources of every rich-text block in the body.
    pub fn rich_text_sources_mut<'a>(
        &'a mut self,
        block_types: &'a [String],
    ) -> impl Iterator<Item = &'a mut String> {
        self.body
            .iter_mut()
            .filter_map(move |block| block.rich_text_source_mut(block_types))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_export() {
        let article: Article = serde_json::from_value(json!({
            "id": 12,
            "title": "Hello",
            "excerpt": "<p>Intro</p>",
            "body": [
                {"type": "paragraph", "value": "<p>One</p>", "id": "b1"},
                {"type": "image", "value": 7}
            ],
            "slug": "hello",
            "tags": ["a", "b"]
        }))
        .unwrap();

        assert_eq!(article.id, Some(12));
        assert_eq!(article.body.len(), 2);
        assert_eq!(article.body[0].id.as_deref(), Some("b1"));
        assert_eq!(article.extra["slug"], "hello");
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let input = json!({
            "id": 1,
            "title": "T",
            "excerpt": "",
            "body": [{"type": "quote", "value": {"text": "q"}}],
            "live": true
        });
        let article: Article = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&article).unwrap(), input);
    }

    #[test]
    fn test_missing_fields_default() {
        let article: Article = serde_json::from_value(json!({"title": "Only"})).unwrap();
        assert_eq!(article, Article::new("Only"));
    }

    #[test]
    fn test_rich_text_sources() {
        let mut article = Article::new("t")
            .with_block(StreamBlock::rich_text("<p>a</p>"))
            .with_block(StreamBlock {
                block_type: "paragraph".to_owned(),
                value: json!({"not": "text"}),
                id: None,
            })
            .with_block(StreamBlock {
                block_type: "embed".to_owned(),
                value: json!("<p>skipped</p>"),
                id: None,
            })
            .with_block(StreamBlock::rich_text("<p>b</p>"));

        let types = vec![DEFAULT_RICH_TEXT_BLOCK.to_owned()];
        let sources: Vec<_> = article
            .rich_text_sources_mut(&types)
            .map(|source| source.clone())
            .collect();
        assert_eq!(sources, vec!["<p>a</p>", "<p>b</p>"]);
    }
}

//! `inform filter` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use inform_config::{CliSettings, Config};
use inform_richtext::{Article, ContentFilter, ContentLocator, FilterKind, Locator};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the filter command.
#[derive(Args)]
pub(crate) struct FilterArgs {
    /// Article export: a JSON array of articles.
    file: PathBuf,

    /// Filter to apply (nbsp, amp, inbound-button).
    #[arg(short, long)]
    filter: FilterKind,

    /// Article fields to filter (body, excerpt, title).
    #[arg(short, long, default_value = "body")]
    locator: Locator,

    /// Replacement text for nbsp and amp (overrides config).
    #[arg(long)]
    replace_with: Option<String>,

    /// Write the filtered articles back to FILE instead of only reporting.
    #[arg(long)]
    write: bool,
}

/// Outcome of filtering an export.
#[derive(Debug)]
pub(crate) struct FilterReport {
    pub(crate) articles: Vec<Article>,
    /// Labels of the articles whose content changed.
    pub(crate) changed: Vec<String>,
}

impl FilterArgs {
    /// Execute the filter command.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be read, parsed, filtered or written.
    pub(crate) fn execute(
        self,
        config_path: Option<&Path>,
        output: &Output,
    ) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            replace_with: self.replace_with.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let filter = self.filter.build(&config.filters.replace_with);
        let locator = self
            .locator
            .with_block_types(config.filters.rich_text_blocks.clone());

        let content = std::fs::read_to_string(&self.file)?;
        let articles: Vec<Article> = serde_json::from_str(&content)?;
        let total = articles.len();

        output.filtering(self.filter, total, &self.file);
        let report = filter_articles(articles, &locator, filter.as_ref())?;

        for label in &report.changed {
            output.changed(label);
        }

        if self.write {
            write_export(&self.file, &report.articles)?;
            output.written(report.changed.len(), total, &self.file);
        } else {
            output.dry_run(report.changed.len(), total);
        }

        Ok(())
    }
}

/// Run `filter` over every article, stopping at the first failure.
pub(crate) fn filter_articles(
    articles: Vec<Article>,
    locator: &impl ContentLocator,
    filter: &dyn ContentFilter,
) -> Result<FilterReport, CliError> {
    let originals = articles.clone();
    let mut report = FilterReport {
        articles: Vec::with_capacity(originals.len()),
        changed: Vec::new(),
    };

    for (index, (original, result)) in originals
        .iter()
        .zip(locator.filter_all(articles, filter))
        .enumerate()
    {
        let label = article_label(original, index);
        let filtered = result.map_err(|source| CliError::Filter {
            article: label.clone(),
            source,
        })?;

        if &filtered != original {
            tracing::info!(article = %label, filter = filter.name(), "Article content changed");
            report.changed.push(label);
        }
        report.articles.push(filtered);
    }

    Ok(report)
}

fn article_label(article: &Article, index: usize) -> String {
    match article.id {
        Some(id) => format!("#{id} {:?}", article.title),
        None => format!("[{index}] {:?}", article.title),
    }
}

/// Replace `path` with the serialized articles via a sibling temporary file.
fn write_export(path: &Path, articles: &[Article]) -> Result<(), CliError> {
    let mut json = serde_json::to_string_pretty(articles)?;
    json.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, json)?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use inform_richtext::{
        ArticleExcerpt, ArticleTitle, InboundButtonFilter, NbspFilter, StreamBlock,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn export() -> Vec<Article> {
        let mut first = Article::new("First")
            .with_block(StreamBlock::rich_text("<p>a&nbsp;b</p>"));
        first.id = Some(1);
        let mut second = Article::new("Second").with_excerpt("x&nbsp;y");
        second.id = Some(2);
        vec![first, second, Article::new("Third")]
    }

    #[test]
    fn test_filter_articles_reports_changes() {
        let report = filter_articles(
            export(),
            &"body".parse::<Locator>().unwrap(),
            &NbspFilter::default(),
        )
        .unwrap();

        assert_eq!(report.articles.len(), 3);
        assert_eq!(report.changed, vec![r##"#1 "First""##]);
        assert_eq!(
            report.articles[0].body[0].value,
            serde_json::json!("<p>a b</p>")
        );
    }

    #[test]
    fn test_filter_articles_no_changes() {
        let report = filter_articles(export(), &ArticleTitle, &NbspFilter::default()).unwrap();
        assert!(report.changed.is_empty());
        assert_eq!(report.articles, export());
    }

    #[test]
    fn test_filter_articles_stops_on_error() {
        let mut articles = export();
        articles.push(Article::new("Broken").with_excerpt("[inbound_button]x"));

        let err =
            filter_articles(articles, &ArticleExcerpt, &InboundButtonFilter::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(r#"[3] "Broken""#), "got: {msg}");
    }

    #[test]
    fn test_write_export_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(&path, "[]").unwrap();

        let articles = export();
        write_export(&path, &articles).unwrap();

        let written: Vec<Article> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, articles);
        assert!(!dir.path().join("articles.json.tmp").exists());
    }
}

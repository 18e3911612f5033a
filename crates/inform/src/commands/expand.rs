//! `inform expand` command implementation.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use inform_config::{Config, TemplateConfig};
use inform_richtext::{HandlerRegistry, RewritePipeline, TemplateHandler};

use crate::error::CliError;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// HTML file to render (default: read stdin).
    file: Option<PathBuf>,
}

impl ExpandArgs {
    /// Execute the expand command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or input cannot be read.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let config = Config::load(config_path, None)?;
        let pipeline = build_pipeline(&config);

        let html = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };

        let mut stdout = io::stdout().lock();
        stdout.write_all(pipeline.expand(&html).as_bytes())?;
        stdout.flush()?;

        Ok(())
    }
}

/// Front-end pipeline with link and embed types taken from `config`.
pub(crate) fn build_pipeline(config: &Config) -> RewritePipeline {
    let pipeline = RewritePipeline::frontend(registry(&config.links), registry(&config.embeds));
    tracing::info!(
        links = config.links.len(),
        embeds = config.embeds.len(),
        rules = ?pipeline,
        "Built rewrite pipeline"
    );
    pipeline
}

fn registry(templates: &BTreeMap<String, TemplateConfig>) -> HandlerRegistry {
    templates
        .iter()
        .fold(HandlerRegistry::new(), |registry, (name, handler)| {
            registry.with(name.clone(), TemplateHandler::new(handler.template.clone()))
        })
}

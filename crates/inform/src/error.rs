//! CLI error types.

use inform_config::ConfigError;
use inform_richtext::FilterError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid article export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("article {article}: {source}")]
    Filter {
        article: String,
        #[source]
        source: FilterError,
    },
}

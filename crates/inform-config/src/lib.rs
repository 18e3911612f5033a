//! Configuration management for Inform.
//!
//! Parses `inform.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [filters]
//! replace_with = " "
//! rich_text_blocks = ["paragraph"]
//!
//! [links.page]
//! template = '<a href="${SITE_URL:-}/pages/{id}/">'
//!
//! [embeds.image]
//! template = '<img src="/images/{id}/" alt="{alt}">'
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `filters.replace_with`
//! - `links.<type>.template`
//! - `embeds.<type>.template`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the content filter replacement string.
    pub replace_with: Option<String>,
    /// Override the rich-text block types.
    pub rich_text_blocks: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "inform.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content filter configuration.
    pub filters: FiltersConfig,
    /// Link handlers by `linktype`.
    pub links: BTreeMap<String, TemplateConfig>,
    /// Embed handlers by `embedtype`.
    pub embeds: BTreeMap<String, TemplateConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Content filter configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Text substituted by the replacing filters.
    pub replace_with: String,
    /// Body block types holding rich text.
    pub rich_text_blocks: Vec<String>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            replace_with: " ".to_owned(),
            rich_text_blocks: vec!["paragraph".to_owned()],
        }
    }
}

/// A link or embed type rendered from a template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// HTML with `{attribute}` placeholders.
    pub template: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`links.page.template`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Type names are matched against `linktype`/`embedtype` attribute values.
fn require_type_name(name: &str, section: &str) -> Result<(), ConfigError> {
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(ConfigError::Validation(format!(
            "invalid {section} type name '{name}' (use letters, digits, '_' or '-')"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `inform.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(replace_with) = &settings.replace_with {
            self.filters.replace_with.clone_from(replace_with);
        }
        if let Some(blocks) = &settings.rich_text_blocks {
            self.filters.rich_text_blocks.clone_from(blocks);
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_filters()?;
        Self::validate_templates(&self.links, "links")?;
        Self::validate_templates(&self.embeds, "embeds")?;
        Ok(())
    }

    fn validate_filters(&self) -> Result<(), ConfigError> {
        if self.filters.rich_text_blocks.is_empty() {
            return Err(ConfigError::Validation(
                "filters.rich_text_blocks must list at least one block type".to_owned(),
            ));
        }
        for block in &self.filters.rich_text_blocks {
            require_non_empty(block, "filters.rich_text_blocks entry")?;
        }
        Ok(())
    }

    fn validate_templates(
        templates: &BTreeMap<String, TemplateConfig>,
        section: &str,
    ) -> Result<(), ConfigError> {
        for (name, handler) in templates {
            require_type_name(name, section)?;
            require_non_empty(&handler.template, &format!("{section}.{name}.template"))?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.filters.replace_with =
            expand::expand_env(&self.filters.replace_with, "filters.replace_with")?;

        for (section, templates) in [("links", &mut self.links), ("embeds", &mut self.embeds)] {
            for (name, handler) in templates.iter_mut() {
                handler.template =
                    expand::expand_env(&handler.template, &format!("{section}.{name}.template"))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.filters.replace_with, " ");
        assert_eq!(config.filters.rich_text_blocks, vec!["paragraph"]);
        assert!(config.links.is_empty());
        assert!(config.embeds.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.filters.replace_with, " ");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[filters]
replace_with = ""
rich_text_blocks = ["paragraph", "text"]

[links.page]
template = '<a href="/pages/{id}/">'

[links.document]
template = '<a href="/documents/{id}/">'

[embeds.image]
template = '<img src="/images/{id}/" alt="{alt}">'
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.filters.replace_with, "");
        assert_eq!(config.filters.rich_text_blocks, vec!["paragraph", "text"]);
        assert_eq!(
            config.links.keys().collect::<Vec<_>>(),
            vec!["document", "page"]
        );
        assert_eq!(
            config.embeds["image"].template,
            r#"<img src="/images/{id}/" alt="{alt}">"#
        );
    }

    #[test]
    fn test_unknown_template_key_rejected() {
        let toml = r#"
[links.page]
template = "<a>"
href = "/x"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[links.page]
template = '<a href="/p/{id}/">'
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.links["page"].template, r#"<a href="/p/{id}/">"#);
    }

    #[test]
    fn test_load_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[filters\nreplace_with = 1");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("INFORM_CONFIG_TEST_SITE", "https://inform.example");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[filters]
replace_with = "${INFORM_CONFIG_TEST_REPLACE:--}"

[links.page]
template = '<a href="${INFORM_CONFIG_TEST_SITE}/p/{id}/">'
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.filters.replace_with, "-");
        assert_eq!(
            config.links["page"].template,
            r#"<a href="https://inform.example/p/{id}/">"#
        );
        unsafe {
            std::env::remove_var("INFORM_CONFIG_TEST_SITE");
        }
    }

    #[test]
    fn test_load_missing_env_var() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[embeds.image]
template = '<img src="${INFORM_CONFIG_TEST_UNSET_CDN}/{id}">'
"#,
        );

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("embeds.image.template"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("site");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = write_config(&nested, "");

        assert_eq!(Config::discover_config(&nested), Some(nearest));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            replace_with: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(config.filters.replace_with, "");
        assert_eq!(config.filters.rich_text_blocks, vec!["paragraph"]);

        config.apply_cli_settings(&CliSettings {
            rich_text_blocks: Some(vec!["text".to_owned()]),
            ..Default::default()
        });
        assert_eq!(config.filters.rich_text_blocks, vec!["text"]);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.filters.replace_with, " ");
    }

    #[test]
    fn test_validate_empty_block_list() {
        let mut config = Config::default();
        config.filters.rich_text_blocks.clear();
        assert_validation_error(&config, &["rich_text_blocks"]);
    }

    #[test]
    fn test_validate_blank_block_type() {
        let mut config = Config::default();
        config.filters.rich_text_blocks.push("  ".to_owned());
        assert_validation_error(&config, &["rich_text_blocks", "empty"]);
    }

    #[test]
    fn test_validate_empty_template() {
        let mut config = Config::default();
        config.links.insert(
            "page".to_owned(),
            TemplateConfig {
                template: String::new(),
            },
        );
        assert_validation_error(&config, &["links.page.template", "empty"]);
    }

    #[test]
    fn test_validate_type_name() {
        let mut config = Config::default();
        config.embeds.insert(
            "my image".to_owned(),
            TemplateConfig {
                template: "<img>".to_owned(),
            },
        );
        assert_validation_error(&config, &["embeds", "my image"]);
    }

    #[test]
    fn test_cli_settings_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let err = Config::load(
            Some(&path),
            Some(&CliSettings {
                rich_text_blocks: Some(Vec::new()),
                ..Default::default()
            }),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}

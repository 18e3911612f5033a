//! Environment variable expansion for configuration strings.

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// `${VAR}` or `${VAR:-default}`.
static ENV_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{[^}]*\}").expect("invalid env reference regex"));

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `${VAR}` with VAR unset is an error. Only braced references are
/// expanded: a bare `$VAR` stays literal even next to a braced one, and so
/// do the `{name}` placeholders of link and embed templates.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut expanded = String::with_capacity(value.len());
    let mut copied = 0;

    for reference in ENV_REFERENCE.find_iter(value) {
        expanded.push_str(&value[copied..reference.start()]);
        let resolved = shellexpand::env_with_context(reference.as_str(), |var| {
            std::env::var(var).map(Some)
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })?;
        expanded.push_str(&resolved);
        copied = reference.end();
    }

    expanded.push_str(&value[copied..]);
    Ok(expanded)
}
